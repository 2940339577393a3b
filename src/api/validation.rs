use super::ApiError;

pub fn validate_id(id: i32, entity: &str) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid {} ID: {}. ID must be a positive integer",
            entity, id
        )));
    }
    Ok(id)
}

pub fn validate_limit(limit: u64, max_limit: u64) -> Result<u64, ApiError> {
    const MIN_LIMIT: u64 = 1;

    if !(MIN_LIMIT..=max_limit).contains(&limit) {
        return Err(ApiError::validation(format!(
            "Invalid limit: {}. Limit must be between {} and {}",
            limit, MIN_LIMIT, max_limit
        )));
    }
    Ok(limit)
}

pub fn validate_username(name: &str) -> Result<&str, ApiError> {
    if name.is_empty() {
        return Err(ApiError::validation("Username cannot be empty"));
    }

    if name.chars().count() > 50 {
        return Err(ApiError::validation(
            "Username must be 50 characters or less",
        ));
    }

    if !name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.')
    {
        return Err(ApiError::validation(
            "Username can only contain letters, numbers, dots, hyphens, and underscores",
        ));
    }

    Ok(name)
}

pub fn validate_email(email: &str) -> Result<&str, ApiError> {
    let trimmed = email.trim();
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(trimmed),
        _ => Err(ApiError::validation(format!("Invalid email address: {email}"))),
    }
}

pub fn validate_search_query(query: &str) -> Result<&str, ApiError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Search query cannot be empty"));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_id() {
        assert!(validate_id(1, "movie").is_ok());
        assert!(validate_id(12345, "movie").is_ok());
        assert!(validate_id(0, "movie").is_err());
        assert!(validate_id(-1, "rating").is_err());
    }

    #[test]
    fn test_validate_limit() {
        assert!(validate_limit(1, 100).is_ok());
        assert!(validate_limit(100, 100).is_ok());
        assert!(validate_limit(0, 100).is_err());
        assert!(validate_limit(101, 100).is_err());
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("ripley").is_ok());
        assert!(validate_username("ellen.ripley_2122-b").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("a".repeat(51).as_str()).is_err());
        assert!(validate_username("with space").is_err());
        assert!(validate_username("bad@name").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ripley@nostromo.space").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@nostromo.space").is_err());
        assert!(validate_email("ripley@").is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert!(validate_search_query("Alien").is_ok());
        assert!(validate_search_query("  trimmed  ").is_ok());
        assert!(validate_search_query("").is_err());
        assert!(validate_search_query("   ").is_err());
    }
}
