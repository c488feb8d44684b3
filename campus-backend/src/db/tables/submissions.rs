//! Contact form and enrollment inquiry storage

use super::super::{new_id, now_rfc3339, Database};
use crate::error::ActionError;
use crate::models::{ContactInput, ContactSubmission, EnrollmentInput, EnrollmentInquiry};

impl Database {
    pub fn insert_contact_submission(
        &self,
        input: &ContactInput,
    ) -> Result<ContactSubmission, ActionError> {
        let conn = self.conn()?;
        let id = new_id();
        let now = now_rfc3339();
        conn.execute(
            "INSERT INTO contact_submissions (id, name, email, subject, message, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![&id, &input.name, &input.email, &input.subject, &input.message, &now],
        )?;
        Ok(ContactSubmission {
            id,
            name: input.name.clone(),
            email: input.email.clone(),
            subject: input.subject.clone(),
            message: input.message.clone(),
            created_at: now,
        })
    }

    pub fn list_contact_submissions(&self) -> Result<Vec<ContactSubmission>, ActionError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, email, subject, message, created_at
             FROM contact_submissions ORDER BY created_at DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(ContactSubmission {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                subject: row.get(3)?,
                message: row.get(4)?,
                created_at: row.get(5)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn insert_enrollment_inquiry(
        &self,
        input: &EnrollmentInput,
    ) -> Result<EnrollmentInquiry, ActionError> {
        let conn = self.conn()?;
        let id = new_id();
        let now = now_rfc3339();
        conn.execute(
            "INSERT INTO enrollment_inquiries (id, name, email, phone, program, message, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                &id,
                &input.name,
                &input.email,
                &input.phone,
                &input.program,
                &input.message,
                &now,
            ],
        )?;
        Ok(EnrollmentInquiry {
            id,
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            program: input.program.clone(),
            message: input.message.clone(),
            created_at: now,
        })
    }

    pub fn list_enrollment_inquiries(&self) -> Result<Vec<EnrollmentInquiry>, ActionError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, email, phone, program, message, created_at
             FROM enrollment_inquiries ORDER BY created_at DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(EnrollmentInquiry {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                phone: row.get(3)?,
                program: row.get(4)?,
                message: row.get(5)?,
                created_at: row.get(6)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
