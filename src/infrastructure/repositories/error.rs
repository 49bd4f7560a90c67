use crate::domain::errors::DomainError;

const CNT_CATEGORY_SLUG: &str = "categories_slug_key";
const CNT_CATEGORY_PARENT: &str = "categories_parent_id_fkey";
const CNT_PRODUCT_SLUG: &str = "products_slug_key";
const CNT_PRODUCT_CATEGORY: &str = "products_category_id_fkey";
const CNT_PRODUCT_PRICE: &str = "products_price_non_negative_chk";
const CNT_PRODUCT_STOCK: &str = "products_stock_non_negative_chk";
const CNT_RATING_GRADE: &str = "ratings_grade_range_chk";
const CNT_REVIEW_RATING: &str = "reviews_rating_id_key";
const CNT_USER_USERNAME: &str = "users_username_key";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_CATEGORY_SLUG | CNT_PRODUCT_SLUG => {
                        DomainError::Conflict("slug already exists".into())
                    }
                    CNT_USER_USERNAME => DomainError::Conflict("username already exists".into()),
                    CNT_REVIEW_RATING => {
                        DomainError::Conflict("rating is already attached to a review".into())
                    }
                    CNT_CATEGORY_PARENT => DomainError::NotFound("parent category not found".into()),
                    CNT_PRODUCT_CATEGORY => DomainError::NotFound("category not found".into()),
                    CNT_PRODUCT_PRICE => {
                        DomainError::Validation("price cannot be negative".into())
                    }
                    CNT_PRODUCT_STOCK => {
                        DomainError::Validation("stock cannot be negative".into())
                    }
                    CNT_RATING_GRADE => {
                        DomainError::Validation("grade is out of range".into())
                    }
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
