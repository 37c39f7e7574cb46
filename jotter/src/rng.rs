use base64ct::{Base64UrlUnpadded, Encoding};
use rand::CryptoRng;

pub fn random_bytes<R: CryptoRng + ?Sized>(rng: &mut R, size: usize) -> Vec<u8> {
    let mut bytes = vec![0; size];
    rng.fill_bytes(bytes.as_mut_slice());
    bytes
}

/// Random bytes in a cookie- and url-safe encoding.
pub fn random_token<R: CryptoRng + ?Sized>(rng: &mut R, size: usize) -> String {
    Base64UrlUnpadded::encode_string(&random_bytes(rng, size))
}
