pub mod assignment_complete;
pub mod channel_release;
pub mod cm_service_request;
pub mod gprs_suspension_request;
pub mod imsi_detach_indication;
pub mod location_updating_request;
pub mod paging_response;
