use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Bootstrap admin credentials. The password must be rotated after first
/// login; it is only here so a fresh deployment is reachable at all.
const ADMIN_EMAIL: &str = "admin@macabre.local";
const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "password";

const AUTHOR_AVATAR: &str = "/img/4a8f619e-b09e-4045-86d6-b6e8f9490542.jpg";

/// Showcase authors the site launched with.
const SEED_AUTHORS: &[(&str, &str, f32, i32, i32)] = &[
    (
        "Александр Темный",
        "Мастер психологических триллеров",
        4.8,
        23,
        340,
    ),
    (
        "Мария Кровавая",
        "Специалист по готической прозе",
        4.6,
        15,
        289,
    ),
    (
        "Николай Мрачный",
        "Король паранормальных историй",
        4.9,
        31,
        456,
    ),
    (
        "Елена Призрачная",
        "Создатель мистических сюжетов",
        4.7,
        19,
        312,
    ),
];

fn hash_admin_password() -> String {
    use sha2::{Digest, Sha256};

    let digest = Sha256::digest(ADMIN_PASSWORD.as_bytes());
    format!("{digest:x}")
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let now = chrono::Utc::now().to_rfc3339();

        let insert_admin = Query::insert()
            .into_table(Users)
            .columns([
                crate::entities::users::Column::Email,
                crate::entities::users::Column::Username,
                crate::entities::users::Column::PasswordHash,
                crate::entities::users::Column::FullName,
                crate::entities::users::Column::Role,
                crate::entities::users::Column::IsActive,
                crate::entities::users::Column::CreatedAt,
                crate::entities::users::Column::UpdatedAt,
            ])
            .values_panic([
                ADMIN_EMAIL.into(),
                ADMIN_USERNAME.into(),
                hash_admin_password().into(),
                "Administrator".into(),
                "admin".into(),
                true.into(),
                now.clone().into(),
                now.into(),
            ])
            .to_owned();

        manager.exec_stmt(insert_admin).await?;

        for (name, bio, rating, stories_count, followers) in SEED_AUTHORS {
            let insert_author = Query::insert()
                .into_table(Authors)
                .columns([
                    crate::entities::authors::Column::Name,
                    crate::entities::authors::Column::Avatar,
                    crate::entities::authors::Column::Bio,
                    crate::entities::authors::Column::Rating,
                    crate::entities::authors::Column::StoriesCount,
                    crate::entities::authors::Column::Followers,
                ])
                .values_panic([
                    (*name).into(),
                    AUTHOR_AVATAR.into(),
                    (*bio).into(),
                    (*rating).into(),
                    (*stories_count).into(),
                    (*followers).into(),
                ])
                .to_owned();

            manager.exec_stmt(insert_author).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete_admin = Query::delete()
            .from_table(Users)
            .and_where(
                Expr::col(crate::entities::users::Column::Username).eq(ADMIN_USERNAME),
            )
            .to_owned();
        manager.exec_stmt(delete_admin).await?;

        let delete_authors = Query::delete().from_table(Authors).to_owned();
        manager.exec_stmt(delete_authors).await?;

        Ok(())
    }
}
