pub mod db;
pub mod repository;

pub mod entity_service;
pub mod purchase_service;

pub mod api_client;
