pub mod cm_service_type;
pub mod location_updating_type;
pub mod mm_message_type;
pub mod protocol_discriminator;
pub mod release_cause;
pub mod rr_message_type;
