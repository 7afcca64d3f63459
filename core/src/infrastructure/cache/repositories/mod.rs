pub mod cache_repository;
