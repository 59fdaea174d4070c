mod ground_truth_tests;
mod node_tests;
mod parser_error_tests;
mod token_stream_tests;
mod utils;
