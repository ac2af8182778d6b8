mod filter_tests;
mod reader_tests;
mod request_tests;
