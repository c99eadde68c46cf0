pub mod get_client_ip;
pub mod id_list;
pub mod markdown;
pub mod social_link;
pub mod valid_uuid;
