mod organization_tests;
mod verification_record_tests;
