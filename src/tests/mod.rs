mod engine_tests;
mod support;
mod whitelist_tests;
