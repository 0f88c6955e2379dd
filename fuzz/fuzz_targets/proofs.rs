#![no_main]

use aggregated_bulletproofs::RangeProof;
use libfuzzer_sys::fuzz_target;

// Test basic deserialization and canonical serialization
fuzz_target!(|data: &[u8]| {
	// If deserialization succeeds, serialization should be canonical
	if let Ok(proof) = RangeProof::from_bytes(data) {
		assert_eq!(&proof.to_bytes(), data);
	}
});
