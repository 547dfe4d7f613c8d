//! Claims codec: compact JWT serialization with HMAC signatures

use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::Claims;
use crate::errors::TokenError;

/// Encodes, signs, decodes and verifies session claims.
///
/// Expiry is not checked here; [`super::TokenValidator`] owns
/// the order of revocation, signature and expiry checks.
pub struct ClaimsCodec {
    algorithm: Algorithm,
    keys: Option<(EncodingKey, DecodingKey)>,
    validation: Validation,
    unverified: Validation,
}

impl ClaimsCodec {
    /// Creates an HS256 codec for the given secret.
    ///
    /// An empty secret yields a codec that cannot sign; [`encode`](Self::encode)
    /// then fails with [`TokenError::SigningKey`].
    pub fn new(secret: &str) -> Self {
        Self::with_algorithm(secret, Algorithm::HS256)
    }

    /// Creates a codec for an HMAC algorithm
    pub fn with_algorithm(secret: &str, algorithm: Algorithm) -> Self {
        let keys = (!secret.is_empty()).then(|| {
            (
                EncodingKey::from_secret(secret.as_bytes()),
                DecodingKey::from_secret(secret.as_bytes()),
            )
        });

        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let mut unverified = Validation::new(algorithm);
        unverified.insecure_disable_signature_validation();
        unverified.validate_exp = false;
        unverified.validate_aud = false;
        unverified.set_required_spec_claims(&["exp"]);

        Self {
            algorithm,
            keys,
            validation,
            unverified,
        }
    }

    /// Signing algorithm in use
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Serializes and signs claims into a bearer token
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let (encoding_key, _) = self.keys.as_ref().ok_or(TokenError::SigningKey)?;
        encode(&Header::new(self.algorithm), claims, encoding_key)
            .map_err(|_| TokenError::SigningKey)
    }

    /// Parses a token and verifies its signature
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let Some((_, decoding_key)) = self.keys.as_ref() else {
            // Nothing can carry a valid signature without a key; still report
            // structural problems as such.
            self.decode_unverified(token)?;
            return Err(TokenError::SignatureInvalid);
        };

        decode::<Claims>(token, decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(classify)
    }

    /// Parses a token without checking its signature.
    ///
    /// Only for recovering the expiry of a token the caller already holds as its
    /// own session credential. Never use the result for authorization.
    pub fn decode_unverified(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &DecodingKey::from_secret(&[]), &self.unverified)
            .map(|data| data.claims)
            .map_err(classify)
    }
}

fn classify(err: JwtError) -> TokenError {
    match err.kind() {
        ErrorKind::InvalidSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::InvalidAlgorithmName
        | ErrorKind::InvalidKeyFormat => TokenError::SignatureInvalid,
        _ => TokenError::MalformedToken,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn sample_claims() -> Claims {
        Claims::new(42, "ketua_rt", 1, Utc::now(), Duration::hours(24)).unwrap()
    }

    #[test]
    fn test_encode_decode() {
        let codec = ClaimsCodec::new("test-secret");
        let claims = sample_claims();

        let token = codec.encode(&claims).unwrap();
        assert_eq!(token.split('.').count(), 3);
        assert_eq!(codec.decode(&token).unwrap(), claims);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let codec = ClaimsCodec::new("test-secret");
        let claims = sample_claims();

        assert_eq!(codec.encode(&claims).unwrap(), codec.encode(&claims).unwrap());
    }

    #[test]
    fn test_decode_ignores_expiry() {
        let codec = ClaimsCodec::new("test-secret");
        let claims = Claims::new(1, "warga", 3, Utc::now() - Duration::days(2), Duration::hours(1)).unwrap();

        let token = codec.encode(&claims).unwrap();
        assert_eq!(codec.decode(&token).unwrap(), claims);
    }

    #[test]
    fn test_wrong_secret_is_signature_invalid() {
        let issuer = ClaimsCodec::new("secret-a");
        let verifier = ClaimsCodec::new("secret-b");

        let token = issuer.encode(&sample_claims()).unwrap();
        assert_eq!(verifier.decode(&token), Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn test_other_algorithm_is_signature_invalid() {
        let issuer = ClaimsCodec::with_algorithm("same-secret", Algorithm::HS512);
        let verifier = ClaimsCodec::new("same-secret");

        let token = issuer.encode(&sample_claims()).unwrap();
        assert_eq!(verifier.decode(&token), Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let codec = ClaimsCodec::new("test-secret");

        for input in ["", "not-a-token", "a.b", "a.b.c", "....", "Bearer x.y.z"] {
            assert_eq!(codec.decode(input), Err(TokenError::MalformedToken), "input {:?}", input);
            assert_eq!(codec.decode_unverified(input), Err(TokenError::MalformedToken));
        }
    }

    #[test]
    fn test_missing_secret() {
        let codec = ClaimsCodec::new("");
        assert_eq!(codec.encode(&sample_claims()), Err(TokenError::SigningKey));

        let token = ClaimsCodec::new("other").encode(&sample_claims()).unwrap();
        assert_eq!(codec.decode(&token), Err(TokenError::SignatureInvalid));
        assert_eq!(codec.decode("garbage"), Err(TokenError::MalformedToken));
    }

    #[test]
    fn test_decode_unverified_reads_foreign_tokens() {
        let claims = sample_claims();
        let token = ClaimsCodec::new("someone-else").encode(&claims).unwrap();

        let codec = ClaimsCodec::new("test-secret");
        assert_eq!(codec.decode_unverified(&token).unwrap().exp, claims.exp);
    }
}
