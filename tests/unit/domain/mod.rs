mod pipeline_properties_test;
