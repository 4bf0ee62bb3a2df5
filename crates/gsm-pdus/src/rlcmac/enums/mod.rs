pub mod control_message_type;
pub mod payload_type;
