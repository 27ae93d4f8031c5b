mod aes_gcm;
mod hmac_sha256;
