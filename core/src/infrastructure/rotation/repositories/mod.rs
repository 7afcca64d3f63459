pub mod rotation_repository;
