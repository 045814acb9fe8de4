/// Network adapters for the vulnerability database and the scan server
mod iq_client;
mod oss_index_client;
#[cfg(test)]
mod test_server;

pub use iq_client::IqClient;
pub use oss_index_client::{Credentials, OssIndexClient};
