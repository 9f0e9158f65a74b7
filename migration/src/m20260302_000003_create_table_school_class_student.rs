use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SchoolClass::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SchoolClass::SchoolClassId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SchoolClass::Name).string_len(16).not_null())
                    .col(ColumnDef::new(SchoolClass::Year).integer().not_null())
                    .to_owned(),
            )
            .await?;

        // One class name per starting year
        manager
            .create_index(
                Index::create()
                    .name("uq_school_class_name_year")
                    .table(SchoolClass::Table)
                    .col(SchoolClass::Name)
                    .col(SchoolClass::Year)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Student::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Student::StudentId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Student::FirstName).string_len(32).not_null())
                    .col(ColumnDef::new(Student::LastName).string_len(32).not_null())
                    .col(ColumnDef::new(Student::Gender).string_len(1).null())
                    .col(ColumnDef::new(Student::Age).integer().not_null())
                    .col(ColumnDef::new(Student::SchoolClassId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_school_class")
                            .from(Student::Table, Student::SchoolClassId)
                            .to(SchoolClass::Table, SchoolClass::SchoolClassId)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_student_school_class_id")
                    .table(Student::Table)
                    .col(Student::SchoolClassId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StudentSubject::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(StudentSubject::StudentId).integer().not_null())
                    .col(ColumnDef::new(StudentSubject::SubjectId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(StudentSubject::StudentId)
                            .col(StudentSubject::SubjectId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_subject_student")
                            .from(StudentSubject::Table, StudentSubject::StudentId)
                            .to(Student::Table, Student::StudentId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_subject_subject")
                            .from(StudentSubject::Table, StudentSubject::SubjectId)
                            .to(Subject::Table, Subject::SubjectId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PresenceList::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PresenceList::PresenceId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PresenceList::StudentId).integer().not_null())
                    .col(ColumnDef::new(PresenceList::Day).timestamp().not_null())
                    .col(ColumnDef::new(PresenceList::Present).boolean().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_presence_list_student")
                            .from(PresenceList::Table, PresenceList::StudentId)
                            .to(Student::Table, Student::StudentId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_presence_list_student_day")
                    .table(PresenceList::Table)
                    .col(PresenceList::StudentId)
                    .col(PresenceList::Day)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PresenceList::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(StudentSubject::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Student::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(SchoolClass::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum SchoolClass {
    Table,
    SchoolClassId,
    Name,
    Year,
}

#[derive(DeriveIden)]
enum Student {
    Table,
    StudentId,
    FirstName,
    LastName,
    Gender,
    Age,
    SchoolClassId,
}

#[derive(DeriveIden)]
enum StudentSubject {
    Table,
    StudentId,
    SubjectId,
}

#[derive(DeriveIden)]
enum PresenceList {
    Table,
    PresenceId,
    StudentId,
    Day,
    Present,
}

#[derive(DeriveIden)]
enum Subject {
    Table,
    SubjectId,
}
