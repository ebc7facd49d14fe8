use crate::{info, vk};

pub fn auth_url() {
    info!("Open the following URL, allow access and copy access_token into the [VK] section of tokens.ini:");
    println!("{}", vk::authorize_url());
}
