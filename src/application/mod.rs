// Application layer - Use cases over the repository
pub mod analytics_service;
pub mod order_repository;
pub mod report_service;
