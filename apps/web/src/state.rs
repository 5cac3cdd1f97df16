use std::sync::Arc;

use crate::client::GatewayClient;
use crate::pages::Pages;

#[derive(Clone)]
pub struct WebState {
    pub gateway: GatewayClient,
    pub pages: Arc<Pages>,
}
