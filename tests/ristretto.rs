// Copyright 2022 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use aggregated_bulletproofs::{
    generators::pedersen_gens::{PEDERSEN_CAPACITY, PRIVATE_KEY_INDEX, RANDOMNESS_INDEX, SHARD_ID_INDEX, SND_INDEX},
    protocols::{ristretto_point_protocol::RistrettoPointProtocol, scalar_protocol::ScalarProtocol},
    traits::HexRepr,
    CommitmentOpening,
    PedersenGens,
    ProofError,
};
use curve25519_dalek::{
    constants::RISTRETTO_BASEPOINT_POINT,
    ristretto::{CompressedRistretto, RistrettoPoint},
    scalar::Scalar,
};

#[test]
fn test_hex_encodings() {
    let mut rng = rand::thread_rng();
    let scalar = Scalar::random_wide(&mut rng);
    assert_eq!(Scalar::from_hex(&scalar.to_hex()).unwrap(), scalar);

    let point = RistrettoPoint::scalar_mult_base(&scalar);
    assert_eq!(RistrettoPoint::from_hex(&point.to_hex()).unwrap(), point);
    assert_eq!(point.to_hex(), point.compress().to_hex());
    assert_eq!(
        CompressedRistretto::from_hex(&point.compress().to_hex()).unwrap(),
        point.compress()
    );

    assert!(matches!(Scalar::from_hex("zz"), Err(ProofError::InvalidEncoding(_))));
    assert!(matches!(Scalar::from_hex("00"), Err(ProofError::InvalidEncoding(_))));
    assert!(matches!(
        Scalar::from_hex(&"ff".repeat(32)),
        Err(ProofError::InvalidEncoding(_))
    ));
    assert!(matches!(
        RistrettoPoint::from_hex(&"ff".repeat(32)),
        Err(ProofError::InvalidEncoding(_))
    ));
}

#[test]
fn test_commit_in_every_slot() {
    let pc_gens = PedersenGens::default();
    let value = Scalar::from(1234u64);
    let blinding = Scalar::from(99u64);
    let blinding_term = blinding * pc_gens.generator(RANDOMNESS_INDEX).unwrap();

    for index in [PRIVATE_KEY_INDEX, SND_INDEX, SHARD_ID_INDEX] {
        let commitment = pc_gens.commit_at_index(&value, &blinding, index).unwrap();
        assert_eq!(commitment, value * pc_gens.generator(index).unwrap() + blinding_term);
    }
    assert_eq!(
        pc_gens.commit_at_index(&value, &blinding, 0).unwrap(),
        pc_gens.commit(&value, &blinding)
    );
    assert!(pc_gens.commit_at_index(&value, &blinding, PEDERSEN_CAPACITY).is_err());

    for index in 0..RANDOMNESS_INDEX {
        let mut openings = [Scalar::ZERO; PEDERSEN_CAPACITY];
        openings[index] = value;
        openings[RANDOMNESS_INDEX] = blinding;
        assert_eq!(
            pc_gens.commit_all(&openings).unwrap(),
            pc_gens.commit_at_index(&value, &blinding, index).unwrap()
        );
    }
    assert!(matches!(
        pc_gens.commit_all(&[value, blinding]),
        Err(ProofError::LengthMismatch(_))
    ));
}

#[test]
fn test_commitments_are_homomorphic() {
    let pc_gens = PedersenGens::default();
    let (v1, r1) = (Scalar::from(10u8), Scalar::from(20u8));
    let (v2, r2) = (Scalar::from(30u8), Scalar::from(40u8));
    assert_eq!(
        pc_gens.commit(&v1, &r1) + pc_gens.commit(&v2, &r2),
        pc_gens.commit(&(v1 + v2), &(r1 + r2))
    );

    let opening = CommitmentOpening::new(40, r1 + r2);
    let sum = (pc_gens.commit(&v1, &r1) + pc_gens.commit(&v2, &r2)).compress();
    assert!(opening.opens(&sum, &pc_gens));
}

#[test]
fn test_generators_are_independent_of_basepoint() {
    let pc_gens = PedersenGens::default();
    let gens = pc_gens.generators();
    assert_eq!(gens[0], RISTRETTO_BASEPOINT_POINT);
    for i in 0..PEDERSEN_CAPACITY {
        for j in i + 1..PEDERSEN_CAPACITY {
            assert_ne!(gens[i], gens[j]);
        }
    }
    assert_eq!(
        gens[SND_INDEX],
        RistrettoPoint::hash_to_point_from_index(SND_INDEX as u64, b"PedersenGens")
    );
}

#[test]
fn test_scalar_ordering_and_duplicates() {
    let small = Scalar::from(5u8);
    let large = Scalar::from(1u64 << 40);
    assert!(small.compare_vartime(&large).is_lt());
    assert!(large.compare_vartime(&small).is_gt());
    assert!(small.compare_vartime(&small).is_eq());
    assert!(Scalar::has_duplicates(&[small, large, small]));
    assert!(!Scalar::has_duplicates(&[small, large]));
}
