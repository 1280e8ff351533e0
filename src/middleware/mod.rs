pub mod hidden_files;
