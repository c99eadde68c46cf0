use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxUserRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxTalentRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxPersonRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxFeedbackRepo {
    pub pool: PgPool,
}
