//! Address encodings: Base58Check, Bech32, CashAddr and SS58.

use bech32::primitives::iter::ByteIterExt;
use bech32::{Bech32, Fe32, Hrp};

use crate::error::{Error, Result};
use crate::hash::{blake2b_512, double_sha256};

/// Encode bytes to Base58Check.
///
/// `version` may be longer than one byte (Zcash transparent addresses use two).
pub fn base58check_encode(version: &[u8], payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(version.len() + payload.len() + 4);
    data.extend_from_slice(version);
    data.extend_from_slice(payload);

    let checksum = double_sha256(&data);
    data.extend_from_slice(&checksum[..4]);

    bs58::encode(data).into_string()
}

fn parse_hrp(hrp: &str) -> Result<Hrp> {
    Hrp::parse(hrp).map_err(|e| Error::Encoding(format!("invalid hrp \"{hrp}\": {e}")))
}

/// Encode a SegWit witness program (Bech32 for v0, Bech32m for v1+).
pub fn bech32_segwit_encode(hrp: &str, version: u8, program: &[u8]) -> Result<String> {
    let hrp = parse_hrp(hrp)?;
    let witness_version =
        Fe32::try_from(version).map_err(|e| Error::Encoding(e.to_string()))?;

    bech32::segwit::encode(hrp, witness_version, program).map_err(|e| Error::Encoding(e.to_string()))
}

/// Encode raw bytes as plain Bech32 without a witness version.
///
/// This is the cosmos-SDK style used by Cosmos Hub, THORChain, Binance
/// Chain and Avalanche.
pub fn bech32_encode(hrp: &str, data: &[u8]) -> Result<String> {
    let hrp = parse_hrp(hrp)?;
    bech32::encode::<Bech32>(hrp, data).map_err(|e| Error::Encoding(e.to_string()))
}

const CASHADDR_CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// CashAddr version byte for a P2PKH payload with a 160-bit hash.
pub const CASHADDR_P2PKH: u8 = 0x00;

/// Encode a CashAddr payload (Bitcoin Cash).
///
/// The checksum commits to `prefix`, but the returned string omits it
/// (`qqp5y9...` rather than `bitcoincash:qqp5y9...`).
pub fn cashaddr_encode(prefix: &str, version: u8, hash: &[u8]) -> String {
    let mut payload = Vec::with_capacity(hash.len() + 1);
    payload.push(version);
    payload.extend_from_slice(hash);

    let data: Vec<u8> = payload
        .iter()
        .copied()
        .bytes_to_fes()
        .map(Fe32::to_u8)
        .collect();

    let mut checked: Vec<u8> = prefix.bytes().map(|b| b & 0x1f).collect();
    checked.push(0);
    checked.extend_from_slice(&data);
    checked.extend_from_slice(&[0u8; 8]);
    let checksum = cashaddr_polymod(&checked);

    data.iter()
        .copied()
        .chain((0..8).map(|i| ((checksum >> (5 * (7 - i))) & 0x1f) as u8))
        .map(|v| char::from(CASHADDR_CHARSET[usize::from(v)]))
        .collect()
}

fn cashaddr_polymod(values: &[u8]) -> u64 {
    const GENERATORS: [u64; 5] = [
        0x98_f2bc_8e61,
        0x79_b76d_99e2,
        0xf3_3e5f_b3c4,
        0xae_2eab_e2a8,
        0x1e_4f43_e470,
    ];

    let mut c: u64 = 1;
    for &d in values {
        let c0 = (c >> 35) as u8;
        c = ((c & 0x07_ffff_ffff) << 5) ^ u64::from(d);
        for (bit, generator) in GENERATORS.iter().enumerate() {
            if c0 & (1 << bit) != 0 {
                c ^= generator;
            }
        }
    }
    c ^ 1
}

/// Context string mixed into every SS58 checksum.
const SS58_CONTEXT: &[u8] = b"SS58PRE";

/// Largest network identifier expressible in SS58.
pub const SS58_MAX_NETWORK: u16 = 0x3fff;

fn ss58_prefix(network: u16) -> Result<Vec<u8>> {
    match network {
        0..=63 => Ok(vec![network as u8]),
        64..=SS58_MAX_NETWORK => {
            let first = (((network & 0b0000_0000_1111_1100) >> 2) as u8) | 0b0100_0000;
            let second = ((network >> 8) as u8) | (((network & 0b0000_0000_0000_0011) as u8) << 6);
            Ok(vec![first, second])
        }
        _ => Err(Error::Encoding(format!(
            "ss58 network {network} exceeds {SS58_MAX_NETWORK}"
        ))),
    }
}

/// Encode a 32-byte public key as an SS58 address for `network`.
pub fn ss58_encode(network: u16, public_key: &[u8; 32]) -> Result<String> {
    let mut data = ss58_prefix(network)?;
    data.extend_from_slice(public_key);
    let checksum = blake2b_512(&[SS58_CONTEXT, data.as_slice()]);
    data.extend_from_slice(&checksum[..2]);
    Ok(bs58::encode(data).into_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    // Decoders used to check what the encoders produce.

    /// Decode a Base58Check string into its checked body (version and payload).
    fn base58check_decode(encoded: &str) -> Result<Vec<u8>> {
        let mut data = bs58::decode(encoded)
            .into_vec()
            .map_err(|e| Error::Encoding(e.to_string()))?;

        if data.len() < 5 {
            return Err(Error::InvalidKeyLength {
                expected: 5,
                actual: data.len(),
            });
        }

        let body_len = data.len() - 4;
        let checksum = double_sha256(&data[..body_len]);
        if data[body_len..] != checksum[..4] {
            return Err(Error::Encoding("base58check checksum mismatch".into()));
        }

        data.truncate(body_len);
        Ok(data)
    }

    /// Decode a SegWit address into (hrp, witness_version, witness_program).
    fn bech32_segwit_decode(encoded: &str) -> Result<(String, u8, Vec<u8>)> {
        let (hrp, version, program) =
            bech32::segwit::decode(encoded).map_err(|e| Error::Encoding(e.to_string()))?;

        Ok((hrp.to_string(), version.to_u8(), program))
    }

    /// Decode an SS58 address for a 32-byte key into (network, public_key).
    fn ss58_decode(encoded: &str) -> Result<(u16, [u8; 32])> {
        let data = bs58::decode(encoded)
            .into_vec()
            .map_err(|e| Error::Encoding(e.to_string()))?;

        let (network, prefix_len) = match data.first() {
            Some(&b) if b < 64 => (u16::from(b), 1),
            Some(&b) if b < 128 && data.len() > 1 => {
                let lower = (b << 2) | (data[1] >> 6);
                let upper = data[1] & 0b0011_1111;
                (u16::from(lower) | (u16::from(upper) << 8), 2)
            }
            _ => return Err(Error::Encoding("invalid ss58 prefix".into())),
        };

        if data.len() != prefix_len + 32 + 2 {
            return Err(Error::InvalidKeyLength {
                expected: prefix_len + 34,
                actual: data.len(),
            });
        }

        let (body, checksum) = data.split_at(prefix_len + 32);
        if checksum != &blake2b_512(&[SS58_CONTEXT, body])[..2] {
            return Err(Error::Encoding("ss58 checksum mismatch".into()));
        }

        let mut public_key = [0u8; 32];
        public_key.copy_from_slice(&body[prefix_len..]);
        Ok((network, public_key))
    }

    mod base58check_tests {
        use super::*;

        #[test]
        fn test_encode_p2pkh_mainnet() {
            let payload = hex!("62e907b15cbf27d5425399ebf6f0fb50ebb88f18");
            assert_eq!(
                base58check_encode(&[0x00], &payload),
                "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa"
            );
        }

        #[test]
        fn test_encode_two_byte_version() {
            let payload = hex!("62e907b15cbf27d5425399ebf6f0fb50ebb88f18");
            let encoded = base58check_encode(&[0x1c, 0xb8], &payload);
            assert!(encoded.starts_with("t1"));
            let body = base58check_decode(&encoded).unwrap();
            assert_eq!(&body[..2], &[0x1c, 0xb8]);
            assert_eq!(&body[2..], &payload);
        }

        #[test]
        fn test_decode_rejects_bad_input() {
            assert!(base58check_decode("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNb").is_err());
            assert!(base58check_decode("1234").is_err());
            assert!(base58check_decode("0OIl").is_err());
        }
    }

    mod bech32_tests {
        use super::*;

        #[test]
        fn test_segwit_v0_bip173_vector() {
            let program = hex!("751e76e8199196d454941c45d1b3a323f1433bd6");
            let encoded = bech32_segwit_encode("bc", 0, &program).unwrap();
            assert_eq!(encoded, "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4");

            let (hrp, version, decoded) = bech32_segwit_decode(&encoded).unwrap();
            assert_eq!(hrp, "bc");
            assert_eq!(version, 0);
            assert_eq!(decoded, program);
        }

        #[test]
        fn test_plain_bech32_has_no_version() {
            let data = hex!("751e76e8199196d454941c45d1b3a323f1433bd6");
            let plain = bech32_encode("bc", &data).unwrap();
            let segwit = bech32_segwit_encode("bc", 0, &data).unwrap();
            assert!(plain.starts_with("bc1"));
            assert_ne!(plain, segwit);
            assert_eq!(plain.len() + 1, segwit.len());
        }

        #[test]
        fn test_invalid_hrp() {
            assert!(bech32_encode("", &[0u8; 20]).is_err());
            assert!(bech32_segwit_encode("", 0, &[0u8; 20]).is_err());
        }
    }

    mod cashaddr_tests {
        use super::*;

        #[test]
        fn test_reference_vector() {
            let hash = hex!("F5BF48B397DAE70BE82B3CCA4793F8EB2B6CDAC9");
            assert_eq!(
                cashaddr_encode("bitcoincash", CASHADDR_P2PKH, &hash),
                "qr6m7j9njldwwzlg9v7v53unlr4jkmx6eylep8ekg2"
            );
        }

        #[test]
        fn test_prefix_changes_checksum() {
            let hash = hex!("F5BF48B397DAE70BE82B3CCA4793F8EB2B6CDAC9");
            let main = cashaddr_encode("bitcoincash", CASHADDR_P2PKH, &hash);
            let test = cashaddr_encode("bchtest", CASHADDR_P2PKH, &hash);
            assert_eq!(main[..34], test[..34]);
            assert_ne!(main, test);
        }
    }

    mod ss58_tests {
        use super::*;

        const PUBKEY: [u8; 32] =
            hex!("7806e3f1de6b8690b8eb57fded933c66f059993ba1d675f49ba3f94fac1f8425");

        #[test]
        fn test_network_specific_addresses() {
            assert_eq!(
                ss58_encode(0, &PUBKEY).unwrap(),
                "13iNnzoLf6XGTwAjjcswpNNJ4YuDXNus6TiKZjZfgXnJu1xD"
            );
            assert_eq!(
                ss58_encode(2, &PUBKEY).unwrap(),
                "FHhJyt9RgGin3yfYgdzaAu9MXBodkAuULpao6rGcEyHTscN"
            );
            assert_eq!(
                ss58_encode(42, &PUBKEY).unwrap(),
                "5En5efYGoKFo2QADmypwgDY9CvuZq5Mj1xyqQSaK8SkniiDe"
            );
        }

        #[test]
        fn test_decode_recovers_network() {
            for network in [0u16, 2, 42, 63, 64, 255, 1284, SS58_MAX_NETWORK] {
                let address = ss58_encode(network, &PUBKEY).unwrap();
                let (decoded_network, key) = ss58_decode(&address).unwrap();
                assert_eq!(decoded_network, network);
                assert_eq!(key, PUBKEY);
            }
        }

        #[test]
        fn test_rejects_out_of_range_network() {
            assert!(ss58_encode(SS58_MAX_NETWORK + 1, &PUBKEY).is_err());
        }

        #[test]
        fn test_decode_rejects_corruption() {
            assert!(ss58_decode("FHhJyt9RgGin3yfYgdzaAu9MXBodkAuULpao6rGcEyHTscM").is_err());
        }
    }
}
