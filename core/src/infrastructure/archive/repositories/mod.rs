pub mod archive_repository;
