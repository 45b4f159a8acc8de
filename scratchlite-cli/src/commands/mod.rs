pub mod create_scratch;
