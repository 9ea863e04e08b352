pub mod report_file;
