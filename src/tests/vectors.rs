//! Known-answer tests from the Speck specification, plus end-to-end
//! scenarios exercising the modes over the cipher family.

use crate::{BlockCipher, BlockDecrypt, Eax, Speck, SpeckSmall, SpeckTiny, Xts};

fn hex_to_bytes(hex: &str) -> Vec<u8> {
    hex::decode(hex).unwrap()
}

/// Checks one Speck128 vector against all three variants, both directions
/// where the variant supports them.
fn run_speck_vector(key_hex: &str, plaintext_hex: &str, ciphertext_hex: &str) {
    let key = hex_to_bytes(key_hex);
    let plaintext = hex_to_bytes(plaintext_hex);
    let ciphertext = hex_to_bytes(ciphertext_hex);

    let mut expected_ct = [0u8; 16];
    let mut expected_pt = [0u8; 16];
    expected_ct.copy_from_slice(&ciphertext);
    expected_pt.copy_from_slice(&plaintext);

    let mut full = Speck::new();
    full.set_key(&key).unwrap();
    let mut block = expected_pt;
    full.encrypt_block(&mut block);
    assert_eq!(block, expected_ct, "Speck encrypt, key {key_hex}");
    full.decrypt_block(&mut block);
    assert_eq!(block, expected_pt, "Speck decrypt, key {key_hex}");

    let mut small = SpeckSmall::new();
    small.set_key(&key).unwrap();
    let mut block = expected_pt;
    small.encrypt_block(&mut block);
    assert_eq!(block, expected_ct, "SpeckSmall encrypt, key {key_hex}");
    small.decrypt_block(&mut block);
    assert_eq!(block, expected_pt, "SpeckSmall decrypt, key {key_hex}");

    let mut tiny = SpeckTiny::new();
    tiny.set_key(&key).unwrap();
    let mut block = expected_pt;
    tiny.encrypt_block(&mut block);
    assert_eq!(block, expected_ct, "SpeckTiny encrypt, key {key_hex}");
}

#[test]
fn test_speck128_128_vector() {
    run_speck_vector(
        "0f0e0d0c0b0a09080706050403020100",
        "6c617669757165207469206564616d20",
        "a65d9851797832657860fedf5c570d18",
    );
}

#[test]
fn test_speck128_192_vector() {
    run_speck_vector(
        "17161514131211100f0e0d0c0b0a09080706050403020100",
        "726148206665696843206f7420746e65",
        "1be4cf3a13135566f9bc185de03c1886",
    );
}

#[test]
fn test_speck128_256_vector() {
    run_speck_vector(
        "1f1e1d1c1b1a191817161514131211100f0e0d0c0b0a09080706050403020100",
        "65736f6874206e49202e72656e6f6f70",
        "4109010405c0f53e4eeeb48d9c188f43",
    );
}

/// The reference scenario for the AEAD path: zero key, zero IV, 64 bytes of
/// a fixed pattern, no associated data.
#[test]
fn test_eax_reference_scenario() {
    let key = [0u8; 16];
    let iv = [0u8; 16];
    let plaintext: Vec<u8> = (0..64u8).map(|i| i.wrapping_mul(7) ^ 0x2a).collect();

    let mut eax = Eax::new(Speck::new());
    eax.set_key(&key).unwrap();
    eax.set_iv(&iv).unwrap();
    let mut ciphertext = vec![0u8; 64];
    eax.encrypt(&mut ciphertext, &plaintext).unwrap();
    let mut tag = [0u8; 16];
    eax.compute_tag(&mut tag).unwrap();
    assert_ne!(ciphertext, plaintext);

    // Decrypting the intact ciphertext authenticates and round-trips.
    eax.set_iv(&iv).unwrap();
    let mut recovered = vec![0u8; 64];
    eax.decrypt(&mut recovered, &ciphertext).unwrap();
    assert!(eax.check_tag(&tag));
    assert_eq!(recovered, plaintext);

    // Corrupting ciphertext byte 0 must be caught.
    let mut corrupted = ciphertext.clone();
    corrupted[0] ^= 0x01;
    eax.set_iv(&iv).unwrap();
    let mut recovered = vec![0u8; 64];
    eax.decrypt(&mut recovered, &corrupted).unwrap();
    assert!(!eax.check_tag(&tag));
}

/// Storage path: sectors written with one variant read back with another,
/// since all variants compute the same permutation.
#[test]
fn test_xts_cross_variant_sector() {
    let key: Vec<u8> = (100..164u8).collect();
    let sector: Vec<u8> = (0..513usize).map(|i| (i * 31 % 251) as u8).collect();

    let mut writer = Xts::new(Speck::new(), Speck::new());
    writer.set_key(&key).unwrap();
    writer.set_sector_size(513).unwrap();
    writer.set_tweak(&42u64.to_le_bytes()).unwrap();
    let mut on_disk = vec![0u8; 513];
    writer.encrypt_sector(&mut on_disk, &sector);

    let mut reader = Xts::new(SpeckSmall::new(), SpeckSmall::new());
    reader.set_key(&key).unwrap();
    reader.set_sector_size(513).unwrap();
    reader.set_tweak(&42u64.to_le_bytes()).unwrap();
    let mut recovered = vec![0u8; 513];
    reader.decrypt_sector(&mut recovered, &on_disk);

    assert_eq!(recovered, sector);
}
