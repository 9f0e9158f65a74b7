use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subject::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subject::SubjectId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subject::Name).string_len(32).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_subject_name")
                    .table(Subject::Table)
                    .col(Subject::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Teacher::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Teacher::TeacherId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Teacher::FirstName).string_len(32).not_null())
                    .col(ColumnDef::new(Teacher::LastName).string_len(32).not_null())
                    .col(ColumnDef::new(Teacher::Gender).string_len(1).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TeacherSubject::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TeacherSubject::TeacherId).integer().not_null())
                    .col(ColumnDef::new(TeacherSubject::SubjectId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(TeacherSubject::TeacherId)
                            .col(TeacherSubject::SubjectId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_teacher_subject_teacher")
                            .from(TeacherSubject::Table, TeacherSubject::TeacherId)
                            .to(Teacher::Table, Teacher::TeacherId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_teacher_subject_subject")
                            .from(TeacherSubject::Table, TeacherSubject::SubjectId)
                            .to(Subject::Table, Subject::SubjectId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TeacherSubject::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Teacher::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Subject::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Subject {
    Table,
    SubjectId,
    Name,
}

#[derive(DeriveIden)]
enum Teacher {
    Table,
    TeacherId,
    FirstName,
    LastName,
    Gender,
}

#[derive(DeriveIden)]
enum TeacherSubject {
    Table,
    TeacherId,
    SubjectId,
}
