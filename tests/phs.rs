use cryptal_phs::derivation::phs::{MAX_PASSWORD, MAX_SALT};
use cryptal_phs::{
    AddressingPolicy, MAX_OUTLEN, MIN_OUTLEN, ParamError, Phs, PhsError, PhsParams, PreTag, Sha512,
    phs, phs_status, server_finish,
};

fn hamming(a: &[u8], b: &[u8]) -> u32 {
    a.iter().zip(b).map(|(x, y)| (x ^ y).count_ones()).sum()
}

fn params(t_cost: u32, m_cost: u32) -> PhsParams {
    PhsParams::builder()
        .t_cost(t_cost)
        .m_cost(m_cost)
        .build()
        .unwrap()
}

#[test]
fn phs_is_deterministic() {
    let mut a = [0u8; 32];
    let mut b = [0u8; 32];
    phs(&mut a, b"password", b"somesalt", 2, 3).unwrap();
    phs(&mut b, b"password", b"somesalt", 2, 3).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, [0u8; 32]);
}

#[test]
fn phs_accepts_minimum_costs() {
    let mut out = [0u8; 32];
    phs(&mut out, b"password", b"somesalt", 1, 1).unwrap();
    assert_ne!(out, [0u8; 32]);
}

#[test]
fn phs_accepts_output_length_bounds() {
    let mut shortest = [0u8; MIN_OUTLEN];
    phs(&mut shortest, b"password", b"somesalt", 1, 1).unwrap();

    let mut longest = [0u8; MAX_OUTLEN];
    phs(&mut longest, b"password", b"somesalt", 1, 1).unwrap();
    assert_ne!(&longest[64..], &[0u8; 64][..]);
}

#[test]
fn phs_rejects_output_past_maximum_without_touching_it() {
    let mut out = [0xaau8; MAX_OUTLEN + 1];
    let err = phs(&mut out, b"password", b"somesalt", 1, 1).unwrap_err();
    assert_eq!(
        err,
        PhsError::InvalidParameter(ParamError::OutputTooLong(MAX_OUTLEN + 1))
    );
    assert!(out.iter().all(|&b| b == 0xaa));

    let mut out = [0u8; MIN_OUTLEN - 1];
    assert!(matches!(
        phs(&mut out, b"password", b"somesalt", 1, 1),
        Err(PhsError::InvalidParameter(ParamError::OutputTooShort(_)))
    ));
}

#[test]
fn phs_rejects_zero_costs() {
    let mut out = [0u8; 32];
    assert_eq!(
        phs(&mut out, b"password", b"somesalt", 0, 1),
        Err(PhsError::InvalidParameter(ParamError::TimeCostTooSmall))
    );
    assert_eq!(
        phs(&mut out, b"password", b"somesalt", 1, 0),
        Err(PhsError::InvalidParameter(ParamError::MemoryCostTooSmall))
    );
}

#[test]
fn phs_rejects_oversized_inputs() {
    let mut out = [0u8; 32];
    let password = vec![b'p'; MAX_PASSWORD + 1];
    assert_eq!(
        phs(&mut out, &password, b"somesalt", 1, 1),
        Err(PhsError::InvalidParameter(ParamError::PasswordTooLong(
            MAX_PASSWORD + 1
        )))
    );

    let salt = vec![b's'; MAX_SALT + 1];
    assert_eq!(
        phs(&mut out, b"password", &salt, 1, 1),
        Err(PhsError::InvalidParameter(ParamError::SaltTooLong(
            MAX_SALT + 1
        )))
    );

    let password = vec![b'p'; MAX_PASSWORD];
    let salt = vec![b's'; MAX_SALT];
    assert!(phs(&mut out, &password, &salt, 1, 1).is_ok());
}

#[test]
fn phs_accepts_empty_password_and_salt() {
    let mut a = [0u8; 32];
    let mut b = [0u8; 32];
    phs(&mut a, b"", b"", 1, 1).unwrap();
    phs(&mut b, b"", b"salt", 1, 1).unwrap();
    assert_ne!(a, b);
}

#[test]
fn status_codes_follow_the_error_kind() {
    let mut out = [0u8; 32];
    assert_eq!(phs_status(&mut out, b"password", b"somesalt", 1, 1), 0);
    assert_eq!(phs_status(&mut out, b"password", b"somesalt", 0, 1), 1);
    assert_eq!(phs_status(&mut out, b"password", b"somesalt", 1, 25), 1);

    let mut long = [0u8; MAX_OUTLEN + 1];
    assert_eq!(phs_status(&mut long, b"password", b"somesalt", 1, 1), 1);

    assert_eq!(PhsError::VerificationFailed.status_code(), 4);
}

#[test]
fn one_character_salt_change_flips_about_half_the_bits() {
    let mut a = [0u8; 32];
    let mut b = [0u8; 32];
    phs(&mut a, b"password", b"salt", 1, 3).unwrap();
    phs(&mut b, b"password", b"salz", 1, 3).unwrap();

    let distance = hamming(&a, &b);
    assert!(
        (80..=176).contains(&distance),
        "hamming distance {distance} is far from 128"
    );
}

#[test]
fn one_character_password_change_flips_about_half_the_bits() {
    let mut a = [0u8; 64];
    let mut b = [0u8; 64];
    phs(&mut a, b"password", b"somesalt", 1, 2).unwrap();
    phs(&mut b, b"passwore", b"somesalt", 1, 2).unwrap();

    let distance = hamming(&a, &b);
    assert!(
        (192..=320).contains(&distance),
        "hamming distance {distance} is far from 256"
    );
}

#[test]
fn every_cost_parameter_changes_the_tag() {
    let mut base = [0u8; 32];
    let mut more_time = [0u8; 32];
    let mut more_memory = [0u8; 32];
    phs(&mut base, b"password", b"somesalt", 1, 2).unwrap();
    phs(&mut more_time, b"password", b"somesalt", 2, 2).unwrap();
    phs(&mut more_memory, b"password", b"somesalt", 1, 3).unwrap();

    assert_ne!(base, more_time);
    assert_ne!(base, more_memory);
}

#[test]
fn output_length_is_bound_into_the_tag() {
    let mut short = [0u8; 16];
    let mut long = [0u8; 32];
    phs(&mut short, b"password", b"somesalt", 1, 2).unwrap();
    phs(&mut long, b"password", b"somesalt", 1, 2).unwrap();
    assert_ne!(&short[..], &long[..16]);
}

#[test]
fn hasher_matches_free_function() {
    let hasher: Phs = Phs::new(params(2, 3)).unwrap();
    let tag = hasher.hash(b"password", b"somesalt").unwrap();

    let mut out = [0u8; 32];
    phs(&mut out, b"password", b"somesalt", 2, 3).unwrap();
    assert_eq!(&tag[..], &out[..]);
}

#[test]
fn verify_accepts_the_right_password_only() {
    let hasher: Phs = Phs::new(params(1, 3)).unwrap();
    let tag = hasher.hash(b"hunter2", b"somesalt").unwrap();

    assert!(hasher.verify(b"hunter2", b"somesalt", &tag).is_ok());
    assert_eq!(
        hasher.verify(b"hunter3", b"somesalt", &tag),
        Err(PhsError::VerificationFailed)
    );
    assert_eq!(
        hasher.verify(b"hunter2", b"othersalt", &tag),
        Err(PhsError::VerificationFailed)
    );

    // A truncated tag is a different tag, not a prefix match.
    assert_eq!(
        hasher.verify(b"hunter2", b"somesalt", &tag[..16]),
        Err(PhsError::VerificationFailed)
    );
}

#[test]
fn server_relief_matches_full_hash() {
    let hasher: Phs = Phs::new(params(1, 3)).unwrap();
    let full = hasher.hash(b"password", b"somesalt").unwrap();

    let pre = hasher.client_hash(b"password", b"somesalt").unwrap();
    assert_eq!(pre.out_len(), 32);

    // The pre-tag travels as bytes.
    let received = PreTag::from_bytes(&pre.to_bytes(), pre.out_len()).unwrap();
    let mut finished = [0u8; 32];
    server_finish(&received, &mut finished).unwrap();

    assert_eq!(&full[..], &finished[..]);
    assert_ne!(&pre.to_bytes()[..32], &finished[..]);
}

#[test]
fn primitive_hash_selects_a_different_function() {
    let blake: Phs = Phs::new(params(1, 2)).unwrap();
    let sha: Phs<Sha512> = Phs::new(params(1, 2)).unwrap();

    let a = blake.hash(b"password", b"somesalt").unwrap();
    let b = sha.hash(b"password", b"somesalt").unwrap();
    assert_ne!(a, b);

    assert!(sha.verify(b"password", b"somesalt", &b).is_ok());
}

#[test]
fn lanes_are_deterministic_and_change_the_tag() {
    let one: Phs = Phs::new(params(2, 4)).unwrap();
    let four: Phs = Phs::new(
        PhsParams::builder()
            .t_cost(2)
            .m_cost(4)
            .lanes(4)
            .build()
            .unwrap(),
    )
    .unwrap();

    let a = one.hash(b"password", b"somesalt").unwrap();
    let b = four.hash(b"password", b"somesalt").unwrap();
    let c = four.hash(b"password", b"somesalt").unwrap();
    assert_ne!(a, b);
    assert_eq!(b, c);
}

#[test]
fn secret_and_associated_data_change_the_tag() {
    let plain: Phs = Phs::new(params(1, 2)).unwrap();
    let peppered: Phs = Phs::new(
        PhsParams::builder()
            .t_cost(1)
            .m_cost(2)
            .secret(b"server pepper")
            .build()
            .unwrap(),
    )
    .unwrap();
    let bound: Phs = Phs::new(
        PhsParams::builder()
            .t_cost(1)
            .m_cost(2)
            .associated_data(b"user-id=42")
            .build()
            .unwrap(),
    )
    .unwrap();

    let a = plain.hash(b"password", b"somesalt").unwrap();
    let b = peppered.hash(b"password", b"somesalt").unwrap();
    let c = bound.hash(b"password", b"somesalt").unwrap();
    assert_ne!(a, b);
    assert_ne!(a, c);
    assert_ne!(b, c);
}

#[test]
fn every_policy_yields_a_distinct_tag() {
    let tags: Vec<_> = [
        AddressingPolicy::DataIndependent,
        AddressingPolicy::DataDependent,
        AddressingPolicy::Hybrid,
    ]
    .into_iter()
    .map(|policy| {
        let params = PhsParams::builder()
            .t_cost(1)
            .m_cost(2)
            .policy(policy)
            .build()
            .unwrap();
        let hasher: Phs = Phs::new(params).unwrap();
        hasher.hash(b"password", b"somesalt").unwrap()
    })
    .collect();

    assert_ne!(tags[0], tags[1]);
    assert_ne!(tags[0], tags[2]);
    assert_ne!(tags[1], tags[2]);
}

#[test]
fn hasher_rejects_invalid_params_up_front() {
    let params = PhsParams {
        lanes: 3,
        ..PhsParams::default()
    };
    assert_eq!(
        Phs::<Sha512>::new(params).unwrap_err(),
        PhsError::InvalidParameter(ParamError::LanesInvalid(3))
    );
}

fn known_answer(params: PhsParams) -> String {
    let hasher: Phs = Phs::new(params).unwrap();
    let tag = hasher.hash(b"password", b"salt").unwrap();
    hex::encode(&tag[..])
}

#[test]
fn phs_known_answer() {
    let mut out = [0u8; 32];
    phs(&mut out, b"password", b"salt", 1, 3).unwrap();
    assert_eq!(
        hex::encode(out),
        "8183901624d9fef80d4bfd17087095bc357d64730604bf122e2fb6f148309d7b"
    );

    phs(&mut out, b"password", b"salz", 1, 3).unwrap();
    assert_eq!(
        hex::encode(out),
        "3da28eb44c39ee475b3749b6c1aa0076fb1ecde259ddb069e9a38168adc38926"
    );
}

#[test]
fn sha512_known_answer() {
    let params = PhsParams::builder().t_cost(1).m_cost(3).build().unwrap();
    let hasher: Phs<Sha512> = Phs::new(params).unwrap();
    let tag = hasher.hash(b"password", b"salt").unwrap();
    assert_eq!(
        hex::encode(&tag[..]),
        "62af30361ebfa5aaa7d9c901881ebd2142771ab1fa49ebc2725ceaec68380aab"
    );
}

#[test]
fn four_lane_known_answer() {
    let params = PhsParams::builder()
        .t_cost(1)
        .m_cost(3)
        .lanes(4)
        .build()
        .unwrap();
    assert_eq!(
        known_answer(params),
        "73d926a06cedf35f180ca9490d17c107f180e2bfd87b56c464e80eac7ac72b49"
    );
}

#[test]
fn long_output_known_answers() {
    let params = PhsParams::builder()
        .t_cost(1)
        .m_cost(3)
        .out_len(64)
        .build()
        .unwrap();
    assert_eq!(
        known_answer(params),
        "52abfb134d22c464f4016b5cc716fa3031ee664e5fe220b4abcfcfb925dfa9a1\
         c320b893de69e5aa155ea04fbd79b4abbb8029608194721a123132cefdf6cf8e"
    );

    let params = PhsParams::builder()
        .t_cost(1)
        .m_cost(3)
        .out_len(MAX_OUTLEN)
        .build()
        .unwrap();
    assert_eq!(
        known_answer(params),
        "dc5f9af5a6a773c68d5583a0fbe4aad69b766e72c7b1e808b9a713dd639a3cad\
         ed39028d19cfd8eaccea72a8edefd7eefe06171a6e73c0702f93677c393e5c68\
         87f4ad6845d3e41ca09ea9f6dcddfce1cf0e278271881d21b1668b95b7a0cf6a\
         0c4cb08247c271d76056963451cb387e0d77aad5a48f29edd063421d517ba66b"
    );
}
