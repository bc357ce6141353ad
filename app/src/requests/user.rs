use serde::Deserialize;
use validator::Validate;

use super::PageQuery;

/// `GET /users/search` and `/users/search/like` query string
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NicknameQuery {
    #[validate(length(min = 1, message = "nickname is required"))]
    pub nickname: String,
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<i64>,
    #[validate(range(min = 1, message = "size must be at least 1"))]
    pub size: Option<i64>,
}

impl NicknameQuery {
    pub fn paging(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            size: self.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally::testing::TestRequest;

    #[test]
    fn empty_nickname_fails_validation() {
        let query: NicknameQuery = TestRequest::get("/users/search?nickname=&page=1")
            .build()
            .query()
            .unwrap();
        let errors = query.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("nickname"));
    }

    #[test]
    fn missing_nickname_is_a_query_error() {
        let result = TestRequest::get("/users/search?page=1")
            .build()
            .query::<NicknameQuery>();
        assert_eq!(result.unwrap_err().status_code(), 400);
    }
}
