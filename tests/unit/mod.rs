/// Unit tests for the public domain API
mod domain_tests;
mod security_tests;
