mod common;

use common::{private_key, public_key, TestResult, FOREIGN_JWT};
use jose_es256k::{
    jwa::JsonWebSigningAlgorithm,
    jwt::{Claims, NumericDate},
    Es256kSigner, Es256kVerifier, JsonWebSignature, JwsHeader, Uri,
};

fn claims() -> TestResult<Claims> {
    let mut claims = Claims::new();
    claims.set_issuer(Uri::parse("did:meta:00000054")?);
    claims.set_subject("did:meta:00000348385");
    claims.set_audience("did:meta:11111111");
    claims.set_expiration_time(NumericDate::from_secs(1568533504));
    claims.set_not_before(NumericDate::from_secs(1565941504));
    claims.set_issued_at(NumericDate::from_secs(1565941504));
    claims.set_jwt_id("http://aaa.com/djkd");
    Ok(claims)
}

#[test]
fn claims_survive_base64url() -> TestResult {
    let claims = claims()?;
    let decoded = Claims::from_base64url(&claims.to_base64url()?)?;

    assert_eq!(decoded, claims);
    assert_eq!(decoded.issuer()?.unwrap().as_str(), "did:meta:00000054");
    assert_eq!(decoded.subject()?, Some("did:meta:00000348385"));
    assert_eq!(
        decoded.audience()?,
        Some(vec!["did:meta:11111111".to_string()])
    );
    assert_eq!(decoded.expiration_time()?.map(|d| d.as_secs()), Some(1568533504));
    assert_eq!(decoded.not_before()?.map(|d| d.as_secs()), Some(1565941504));
    assert_eq!(decoded.issued_at()?.map(|d| d.as_secs()), Some(1565941504));
    assert_eq!(decoded.jwt_id()?, Some("http://aaa.com/djkd"));
    Ok(())
}

#[test]
fn signed_jwt() -> TestResult {
    let mut header = JwsHeader::new(JsonWebSigningAlgorithm::Es256K);
    header.set_key_id("did:meta:00000054#ManagementKey#848594325849485");
    header.set_media_type("JWT");

    let mut jws = JsonWebSignature::new(header, claims()?.to_bytes()?)?;
    jws.sign(&Es256kSigner::new(&private_key())?)?;
    let token = jws.serialize()?;

    let parsed = JsonWebSignature::parse(&token)?;
    assert!(parsed.verify(&Es256kVerifier::new(public_key()))?);
    assert_eq!(parsed.header().media_type()?, Some("JWT"));
    assert_eq!(Claims::from_json_bytes(parsed.payload())?, claims()?);
    Ok(())
}

#[test]
fn foreign_jwt_claims() -> TestResult {
    let jws = JsonWebSignature::parse(FOREIGN_JWT)?;
    let claims = Claims::from_json_bytes(jws.payload())?;

    assert_eq!(claims, self::claims()?);
    Ok(())
}

#[test]
fn times_are_truncated() -> TestResult {
    let claims = Claims::from_json_str(r#"{"exp":1568533504,"nbf":"later"}"#)?;
    assert_eq!(
        claims.expiration_time()?,
        Some(NumericDate::from(std::time::Duration::from_secs_f64(
            1568533504.75
        )))
    );
    assert!(claims.not_before().is_err());
    Ok(())
}
