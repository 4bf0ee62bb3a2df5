pub mod classmark;
pub mod location_area_id;
pub mod mobile_identity;
pub mod routing_area_id;
