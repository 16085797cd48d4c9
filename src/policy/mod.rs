pub mod s3_fifo;
