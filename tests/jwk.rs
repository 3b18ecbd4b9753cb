mod common;

use common::{read_jwk, TestResult};
use jose_jwe::{
    crypto::rsa::{PrivateKey, PublicKey},
    jwk::{JsonWebKeyType, KeyKind, KeyUsage},
    JsonWebKey,
};
use serde_json::Value;

fn read_json(name: &str) -> TestResult<Value> {
    let key = read_jwk(name)?;
    Ok(serde_json::to_value(&key)?)
}

#[test]
fn rsa_private_key_roundtrip() -> TestResult {
    let key = read_jwk("rsa-2048")?;
    assert_eq!(key.kind(), KeyKind::RsaPrivate);
    assert_eq!(key.key_id(), Some("rsa-2048"));
    assert_eq!(key.key_use(), Some(&KeyUsage::Encryption));

    let JsonWebKeyType::RsaPrivate(private) = key.key_type() else {
        panic!("expected an RSA private key");
    };
    assert_eq!(private.bits(), 2048);

    let original: Value = serde_json::from_str(&std::fs::read_to_string(format!(
        "{}/tests/vectors/jwk/rsa-2048.json",
        env!("CARGO_MANIFEST_DIR"),
    ))?)?;
    let json = serde_json::to_value(&key)?;
    for member in ["kty", "kid", "use", "n", "e", "d", "p", "q", "dp", "dq", "qi"] {
        assert_eq!(json[member], original[member], "{member}");
    }

    let reparsed: JsonWebKey = serde_json::from_value(json)?;
    assert_eq!(reparsed, key);
    Ok(())
}

#[test]
fn rsa_public_key_roundtrip() -> TestResult {
    let key = read_jwk("rsa-2048.pub")?;
    assert_eq!(key.kind(), KeyKind::RsaPublic);

    let private = read_jwk("rsa-2048")?;
    let (JsonWebKeyType::RsaPublic(public), JsonWebKeyType::RsaPrivate(private)) =
        (key.key_type(), private.key_type())
    else {
        panic!("unexpected key types");
    };
    assert_eq!(public, &private.to_public_key());

    let json = read_json("rsa-2048.pub")?;
    assert!(json.get("d").is_none());
    let direct: PublicKey = serde_json::from_value(json)?;
    assert_eq!(&direct, public);
    Ok(())
}

#[test]
fn symmetric_keys() -> TestResult {
    for (name, len) in [("oct-128", 16), ("oct-192", 24), ("oct-256", 32)] {
        let key = read_jwk(name)?;
        let JsonWebKeyType::Symmetric(oct) = key.key_type() else {
            panic!("expected a symmetric key");
        };
        assert_eq!(oct.len(), len);
        assert_eq!(read_json(name)?["kty"], "oct");
    }
    Ok(())
}

#[test]
fn rsa_multi_prime_keys_are_rejected() -> TestResult {
    let mut json = read_json("rsa-512")?;
    json["oth"] = serde_json::json!([{ "r": "AQAB", "d": "AQAB", "t": "AQAB" }]);

    let err = serde_json::from_value::<JsonWebKey>(json).unwrap_err();
    assert!(err.to_string().contains("oth"), "{err}");
    Ok(())
}

#[test]
fn rsa_private_key_without_primes_is_rejected() -> TestResult {
    let mut json = read_json("rsa-512")?;
    let members = json.as_object_mut().ok_or("not an object")?;
    for name in ["p", "q", "dp", "dq", "qi"] {
        members.remove(name);
    }

    assert!(serde_json::from_value::<PrivateKey>(json).is_err());
    Ok(())
}

#[test]
fn generated_keys_serialize() -> TestResult {
    let key = PrivateKey::generate(&mut rand_core::OsRng, 1024)?;
    let jwk = JsonWebKey::new(key.clone()).with_kid("generated");

    let json = serde_json::to_string(&jwk)?;
    let parsed: JsonWebKey = json.parse()?;
    assert_eq!(parsed, jwk);
    assert_eq!(parsed.key_id(), Some("generated"));

    let public = JsonWebKey::new(key.to_public_key());
    assert_ne!(
        serde_json::to_value(&public)?,
        serde_json::to_value(&JsonWebKey::new(key))?
    );
    Ok(())
}

#[test]
fn malformed_keys() {
    for input in [
        "",
        "[]",
        r#"{"kty":"RSA","n":"AQAB"}"#,
        r#"{"kty":"oct"}"#,
        r#"{"kty":"oct","k":"A+B/"}"#,
        r#"{"kty":"OKP","crv":"X25519","x":"AAAA"}"#,
    ] {
        assert!(input.parse::<JsonWebKey>().is_err(), "{input:?}");
    }
}
