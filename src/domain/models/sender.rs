#[derive(Debug, Clone)]
pub struct SenderCredentials {
    pub phone_number_id: String,
    pub access_token: String,
}
