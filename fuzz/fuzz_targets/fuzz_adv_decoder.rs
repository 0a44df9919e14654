//! Fuzz target: `decode_adv_data`
//!
//! Feeds arbitrary bytes to the advertising-data parser and checks that it
//! never panics, never accepts more than a legacy PDU, and that every
//! recovered field fits inside it.
//!
//! cargo fuzz run fuzz_adv_decoder

#![no_main]

use ble_rotator::identity::{MAX_ADV_DATA_LEN, decode_adv_data};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(adv) = decode_adv_data(data) {
        assert!(data.len() <= MAX_ADV_DATA_LEN, "oversized payload accepted");
        if let Some(name) = adv.name {
            assert!(name.len() < MAX_ADV_DATA_LEN);
        }
        if let Some(vendor) = adv.vendor {
            assert!(vendor.len() < MAX_ADV_DATA_LEN);
        }
    }
});
