mod http_email_tests;
