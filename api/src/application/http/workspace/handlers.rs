pub mod ask_workspace;
pub mod upload_files;
