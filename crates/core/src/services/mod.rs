pub mod detection_service;
pub mod factory_service;
pub mod merge_service;
pub mod migration_service;
pub mod validation_service;
