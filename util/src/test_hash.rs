#![cfg(test)]
#![allow(missing_docs)]
use crate::hash::{address_key, float_key, text_key, KeyHash};

#[test]
fn integers_are_their_own_key() {
    assert_eq!(5i32.key_hash(), 5);
    assert_eq!(5u8.key_hash(), 5);
    assert_eq!(0usize.key_hash(), 0);
    assert_eq!((-1i32).key_hash(), u64::MAX);
    assert_eq!((-2i64).key_hash(), u64::MAX - 1);
    assert_eq!(true.key_hash(), 1);
    assert_eq!(false.key_hash(), 0);
    assert_eq!('a'.key_hash(), 97);
}

#[test]
fn float_keys_ignore_low_bits() {
    assert_eq!(float_key(2.5), 2.5f64.to_bits() & 0xffff_f000);
    let a = f64::from_bits(0x4004_0000_1234_5001);
    let b = f64::from_bits(0x4004_0000_1234_5ffe);
    assert_eq!(a.key_hash(), b.key_hash());
    assert_eq!(a.key_hash(), 0x1234_5000);
    assert_eq!(2.5f32.key_hash(), (2.5f32 as f64).key_hash());
}

#[test]
fn text_keys_are_rolling() {
    assert_eq!(text_key(b""), 0);
    assert_eq!("a".key_hash(), 97);
    assert_eq!("aa".key_hash(), 97 * 101 + 97);
    assert_eq!("ab".key_hash(), 97 * 101 + 98);
    assert_eq!("aaa".key_hash(), (97 * 101 + 97) * 101 + 97);
    assert_eq!(String::from("ba").key_hash(), "ba".key_hash());
    assert_eq!((&"ba").key_hash(), "ba".key_hash());

    let long = "a".repeat(53);
    let expected = long
        .bytes()
        .fold(0u32, |h, b| h.wrapping_mul(101).wrapping_add(b as u32));
    assert_eq!(long.key_hash(), expected as u64);
}

#[test]
fn address_keys_follow_storage() {
    let a = 5;
    let b = 5;
    assert_eq!(address_key(&a), address_key(&a));
    assert_ne!(address_key(&a), address_key(&b));
    let text = String::from("abc");
    assert_eq!(address_key(text.as_str()), text.as_ptr() as usize as u64);
}
