//! Tests for batch creation
//!
//! Covers the batcher's accept/reject rules and the shape of the signed batches.

#[cfg(test)]
mod tests {
    use crate::{
        Batch, BatchHeader, BatchList, Transaction, TransactionHeader,
        batch::{BatchEncoder, Batcher},
        config::SigningConfig,
        error::BatchError,
        signing::{Signer, verify},
        transaction::TransactionEncoder,
    };
    use prost::Message;
    use tracing_test::traced_test;

    /// Helper: batcher with a random key plus an encoder for one user
    fn setup() -> (Batcher, Signer, TransactionEncoder) {
        let batcher_key = Signer::random();
        let user = TransactionEncoder::new(Signer::random(), "track_and_trade", "1.0")
            .with_batcher(batcher_key.public_key());
        (Batcher::with_signer(batcher_key.clone()), batcher_key, user)
    }

    /// Helper: `count` signed transactions from `encoder`
    fn create_txns(encoder: &TransactionEncoder, count: usize) -> Vec<Transaction> {
        (0..count)
            .map(|i| encoder.create(format!("payload-{}", i).into_bytes()).unwrap())
            .collect()
    }

    fn decode_header(batch: &Batch) -> BatchHeader {
        BatchHeader::decode(batch.header.as_slice()).unwrap()
    }

    #[test]
    fn test_batch_preserves_transactions_and_order() {
        let (batcher, batcher_key, user) = setup();
        let txns = create_txns(&user, 3);

        let batch = batcher
            .batch(&TransactionEncoder::encode(txns.clone()), user.signer_public_key())
            .unwrap();

        assert_eq!(batch.transactions, txns);
        assert!(!batch.trace);

        let header = decode_header(&batch);
        assert_eq!(header.signer_public_key, batcher_key.public_key());
        let ids: Vec<String> = txns.iter().map(|t| t.header_signature.clone()).collect();
        assert_eq!(header.transaction_ids, ids);
    }

    #[test]
    fn test_batch_signature_verifies() {
        let (batcher, batcher_key, user) = setup();
        let blob = TransactionEncoder::encode(create_txns(&user, 2));

        let batch = batcher.batch(&blob, user.signer_public_key()).unwrap();

        assert!(verify(batcher_key.public_key(), &batch.header, &batch.header_signature).unwrap());
    }

    #[test]
    fn test_repeated_calls_produce_independently_valid_batches() {
        let (batcher, batcher_key, user) = setup();
        let blob = TransactionEncoder::encode(create_txns(&user, 2));

        let first = batcher.batch(&blob, user.signer_public_key()).unwrap();
        let second = batcher.batch(&blob, user.signer_public_key()).unwrap();

        for batch in [&first, &second] {
            assert!(verify(batcher_key.public_key(), &batch.header, &batch.header_signature).unwrap());
            // The batched transactions must pass the same checks again
            let resubmitted = TransactionEncoder::encode(batch.transactions.clone());
            assert!(batcher.batch(&resubmitted, user.signer_public_key()).is_ok());
        }
        assert_eq!(first.transactions, second.transactions);
    }

    #[test]
    fn test_empty_list_is_batched() {
        let (batcher, _, user) = setup();

        let batch = batcher
            .batch(&TransactionEncoder::encode(Vec::new()), user.signer_public_key())
            .unwrap();

        assert!(batch.transactions.is_empty());
        assert!(decode_header(&batch).transaction_ids.is_empty());
    }

    #[test]
    fn test_empty_blob_is_an_empty_list() {
        let (batcher, _, _) = setup();

        // A zero-length protobuf message decodes to its defaults
        let batch = batcher.batch(&[], "anyone").unwrap();
        assert!(batch.transactions.is_empty());
    }

    #[test]
    fn test_wrong_batcher_rejected_at_any_position() {
        let (batcher, batcher_key, user) = setup();
        let other_server = Signer::random();

        // Signed by `user`, but built for another server
        let user_key = user.signer_public_key().to_string();
        let bad_header = TransactionHeader {
            batcher_public_key: other_server.public_key().to_string(),
            ..user.header_for(b"bad")
        };
        let bad = user.create_with_header(&bad_header, b"bad".to_vec()).unwrap();

        let good = create_txns(&user, 2);
        let cases = vec![
            vec![bad.clone()],
            vec![bad.clone(), good[0].clone(), good[1].clone()],
            vec![good[0].clone(), good[1].clone(), bad.clone()],
        ];

        for txns in cases {
            let err = batcher
                .batch(&TransactionEncoder::encode(txns), &user_key)
                .unwrap_err();
            match err {
                BatchError::InvalidRequest { expected } => {
                    assert_eq!(expected, batcher_key.public_key())
                }
                other => panic!("unexpected error: {:?}", other),
            }
        }
    }

    #[test]
    fn test_wrong_signer_is_unauthorized() {
        let (batcher, _, user) = setup();
        let blob = TransactionEncoder::encode(create_txns(&user, 2));
        let someone_else = Signer::random();

        let err = batcher.batch(&blob, someone_else.public_key()).unwrap_err();
        assert!(matches!(err, BatchError::Unauthorized));
    }

    #[test]
    fn test_mixed_signers_are_unauthorized() {
        let (batcher, batcher_key, user) = setup();
        let other = TransactionEncoder::new(Signer::random(), "track_and_trade", "1.0")
            .with_batcher(batcher_key.public_key());

        let mut txns = create_txns(&user, 1);
        txns.extend(create_txns(&other, 1));

        let err = batcher
            .batch(&TransactionEncoder::encode(txns), user.signer_public_key())
            .unwrap_err();
        assert!(matches!(err, BatchError::Unauthorized));
    }

    #[test]
    fn test_first_violation_wins() {
        let (batcher, _, user) = setup();
        let other_batcher = Signer::random();
        let misdirected = TransactionEncoder::new(Signer::random(), "track_and_trade", "1.0")
            .with_batcher(other_batcher.public_key());

        // Signer mismatch comes before the batcher mismatch
        let mut txns = create_txns(&user, 1);
        txns.extend(create_txns(&misdirected, 1));
        let err = batcher
            .batch(&TransactionEncoder::encode(txns), misdirected.signer_public_key())
            .unwrap_err();
        assert!(matches!(err, BatchError::Unauthorized));

        // Batcher check runs first within one header
        let err = batcher
            .batch(
                &TransactionEncoder::encode(create_txns(&misdirected, 1)),
                user.signer_public_key(),
            )
            .unwrap_err();
        assert!(matches!(err, BatchError::InvalidRequest { .. }));
    }

    #[test]
    fn test_disabled_batcher_fails_fast() {
        let batcher = Batcher::disabled();
        let user = TransactionEncoder::new(Signer::random(), "track_and_trade", "1.0");
        let blob = TransactionEncoder::encode(create_txns(&user, 1));

        assert!(batcher.public_key().is_none());
        assert!(matches!(
            batcher.batch(&blob, user.signer_public_key()),
            Err(BatchError::Config)
        ));
        // Decoding is never attempted
        assert!(matches!(
            batcher.batch(b"\xff\xff\xff", user.signer_public_key()),
            Err(BatchError::Config)
        ));
    }

    #[test]
    fn test_new_without_key_is_disabled() {
        let batcher = Batcher::new(None).unwrap();
        assert!(batcher.public_key().is_none());
    }

    #[test]
    fn test_new_with_malformed_key_is_error() {
        assert!(Batcher::new(Some("zz")).is_err());
    }

    #[test]
    fn test_new_with_key_derives_public_key() {
        let key = "2f1e7b7a130d7ba9da0068b3bb0ba1d79e7e77110302c9f746c3c2a63fe40088";
        let batcher = Batcher::new(Some(key)).unwrap();
        let signer = Signer::from_hex(key).unwrap();

        assert_eq!(batcher.public_key(), Some(signer.public_key()));
    }

    #[test]
    #[traced_test]
    fn test_disabled_batcher_logs_warning() {
        let _ = Batcher::new(None).unwrap();
        assert!(logs_contain("server cannot submit transactions"));
    }

    #[test]
    fn test_new_with_blank_key_is_disabled() {
        assert!(Batcher::new(Some("")).unwrap().public_key().is_none());
        assert!(Batcher::new(Some("  \n")).unwrap().public_key().is_none());
    }

    #[test]
    fn test_from_config_with_blank_variable_is_disabled() {
        let config = SigningConfig {
            private_key_env: "TXN_BATCHER_TEST_BLANK_KEY".to_string(),
        };
        // Each test uses its own variable name
        unsafe { std::env::set_var(&config.private_key_env, "   ") };

        let batcher = Batcher::from_config(&config).unwrap();
        assert_eq!(batcher.public_key(), None);
    }

    #[test]
    fn test_from_config_with_key_is_active() {
        let key = "2f1e7b7a130d7ba9da0068b3bb0ba1d79e7e77110302c9f746c3c2a63fe40088";
        let config = SigningConfig {
            private_key_env: "TXN_BATCHER_TEST_VALID_KEY".to_string(),
        };
        unsafe { std::env::set_var(&config.private_key_env, key) };

        let batcher = Batcher::from_config(&config).unwrap();
        let signer = Signer::from_hex(key).unwrap();
        assert_eq!(batcher.public_key(), Some(signer.public_key()));
    }

    #[test]
    fn test_malformed_list_is_decode_error() {
        let (batcher, _, user) = setup();

        let err = batcher.batch(b"\xff\xff\xff", user.signer_public_key()).unwrap_err();
        assert!(matches!(err, BatchError::Decode(_)));
    }

    #[test]
    fn test_malformed_header_is_decode_error() {
        let (batcher, _, user) = setup();
        let mut txns = create_txns(&user, 2);
        txns[1].header = vec![0xff, 0xff, 0xff];

        let err = batcher
            .batch(&TransactionEncoder::encode(txns), user.signer_public_key())
            .unwrap_err();
        assert!(matches!(err, BatchError::Decode(_)));
    }

    #[test]
    fn test_encode_batch_list() {
        let (batcher, _, user) = setup();
        let batch = batcher
            .batch(&TransactionEncoder::encode(create_txns(&user, 1)), user.signer_public_key())
            .unwrap();

        let encoded = BatchEncoder::encode(vec![batch.clone()]);
        let decoded = BatchList::decode(encoded.as_slice()).unwrap();

        assert_eq!(decoded.batches, vec![batch]);
    }
}
