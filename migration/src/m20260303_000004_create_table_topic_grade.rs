use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SchoolSubjectTopic::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SchoolSubjectTopic::TopicId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SchoolSubjectTopic::Name).string_len(64).not_null())
                    .col(ColumnDef::new(SchoolSubjectTopic::SubjectId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_school_subject_topic_subject")
                            .from(SchoolSubjectTopic::Table, SchoolSubjectTopic::SubjectId)
                            .to(Subject::Table, Subject::SubjectId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_school_subject_topic_subject_name")
                    .table(SchoolSubjectTopic::Table)
                    .col(SchoolSubjectTopic::SubjectId)
                    .col(SchoolSubjectTopic::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Grade::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Grade::GradeId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Grade::Value).double().not_null())
                    .col(ColumnDef::new(Grade::SubjectId).integer().not_null())
                    .col(ColumnDef::new(Grade::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_grade_subject")
                            .from(Grade::Table, Grade::SubjectId)
                            .to(Subject::Table, Subject::SubjectId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_grade_subject_id")
                    .table(Grade::Table)
                    .col(Grade::SubjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GradeStudent::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GradeStudent::GradeId).integer().not_null())
                    .col(ColumnDef::new(GradeStudent::StudentId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(GradeStudent::GradeId)
                            .col(GradeStudent::StudentId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_grade_student_grade")
                            .from(GradeStudent::Table, GradeStudent::GradeId)
                            .to(Grade::Table, Grade::GradeId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_grade_student_student")
                            .from(GradeStudent::Table, GradeStudent::StudentId)
                            .to(Student::Table, Student::StudentId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GradeTopic::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GradeTopic::GradeId).integer().not_null())
                    .col(ColumnDef::new(GradeTopic::TopicId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(GradeTopic::GradeId)
                            .col(GradeTopic::TopicId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_grade_topic_grade")
                            .from(GradeTopic::Table, GradeTopic::GradeId)
                            .to(Grade::Table, Grade::GradeId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_grade_topic_topic")
                            .from(GradeTopic::Table, GradeTopic::TopicId)
                            .to(SchoolSubjectTopic::Table, SchoolSubjectTopic::TopicId)
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
            .drop_table(Table::drop().table(GradeTopic::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(GradeStudent::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Grade::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(SchoolSubjectTopic::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum SchoolSubjectTopic {
    Table,
    TopicId,
    Name,
    SubjectId,
}

#[derive(DeriveIden)]
enum Grade {
    Table,
    GradeId,
    Value,
    SubjectId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum GradeStudent {
    Table,
    GradeId,
    StudentId,
}

#[derive(DeriveIden)]
enum GradeTopic {
    Table,
    GradeId,
    TopicId,
}

#[derive(DeriveIden)]
enum Subject {
    Table,
    SubjectId,
}

#[derive(DeriveIden)]
enum Student {
    Table,
    StudentId,
}
