//! bcrypt hashing on the blocking thread pool

use crate::errors::DomainError;

/// Hash a password with the given bcrypt cost
pub async fn hash_password(password: String, cost: u32) -> Result<String, DomainError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| DomainError::internal(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| DomainError::internal(format!("Password hashing failed: {}", e)))
}

/// Check a password against a stored bcrypt hash
///
/// A malformed stored hash counts as a mismatch.
pub async fn verify_password(password: String, hash: String) -> Result<bool, DomainError> {
    let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| DomainError::internal(format!("Password verification task failed: {}", e)))?;

    match verified {
        Ok(matches) => Ok(matches),
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash could not be parsed");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hash = hash_password("s3cret".to_string(), 4).await.unwrap();
        assert!(hash.starts_with("$2"));
        assert!(verify_password("s3cret".to_string(), hash.clone()).await.unwrap());
        assert!(!verify_password("wrong".to_string(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_hash_is_a_mismatch() {
        assert!(!verify_password("s3cret".to_string(), "plain".to_string())
            .await
            .unwrap());
    }
}
