use prereq_graph_core::GraphError;

/// Validate that a depth parameter is non-negative.
pub fn check_non_negative(value: i64) -> Result<u32, GraphError> {
    if value < 0 {
        return Err(GraphError::InvalidDepth { depth: value });
    }
    Ok(u32::try_from(value).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_non_negative() {
        assert_eq!(check_non_negative(0), Ok(0));
        assert_eq!(check_non_negative(7), Ok(7));
        assert_eq!(check_non_negative(i64::MAX), Ok(u32::MAX));
        assert_eq!(
            check_non_negative(-1),
            Err(GraphError::InvalidDepth { depth: -1 })
        );
    }
}
