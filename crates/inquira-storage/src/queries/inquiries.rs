// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inquiry-history CRUD, filtered listing, substring search, and analytics.

use std::collections::BTreeMap;

use inquira_core::InquiraError;
use rusqlite::{params, params_from_iter, OptionalExtension};

use crate::database::{map_tr_err, Database};
use crate::models::{
    AnalyticsSummary, HistoryFilter, InquiryRecord, NewInquiryRecord, SearchField, TopUser,
};

const RECORD_COLUMNS: &str = "id, processing_id, email, name, phone, category, message, \
                              response, email_title, email_body, listing_id, created_at";

fn row_to_record(row: &rusqlite::Row<'_>) -> Result<InquiryRecord, rusqlite::Error> {
    Ok(InquiryRecord {
        id: row.get(0)?,
        processing_id: row.get(1)?,
        email: row.get(2)?,
        name: row.get(3)?,
        phone: row.get(4)?,
        category: row.get(5)?,
        message: row.get(6)?,
        response: row.get(7)?,
        email_title: row.get(8)?,
        email_body: row.get(9)?,
        listing_id: row.get(10)?,
        created_at: row.get(11)?,
    })
}

/// Insert one history row, returning its rowid.
pub async fn insert(db: &Database, rec: NewInquiryRecord) -> Result<i64, InquiraError> {
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO inquiries
                     (processing_id, email, name, phone, category, message, response,
                      email_title, email_body, listing_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    rec.processing_id,
                    rec.email,
                    rec.name,
                    rec.phone,
                    rec.category,
                    rec.message,
                    rec.response,
                    rec.email_title,
                    rec.email_body,
                    rec.listing_id,
                    rec.created_at,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)
}

/// Insert a batch of history rows in one transaction.
pub async fn insert_batch(
    db: &Database,
    records: Vec<NewInquiryRecord>,
) -> Result<usize, InquiraError> {
    let count = records.len();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare(
                    "INSERT INTO inquiries
                         (processing_id, email, name, phone, category, message, response,
                          email_title, email_body, listing_id, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                )?;
                for rec in &records {
                    stmt.execute(params![
                        rec.processing_id,
                        rec.email,
                        rec.name,
                        rec.phone,
                        rec.category,
                        rec.message,
                        rec.response,
                        rec.email_title,
                        rec.email_body,
                        rec.listing_id,
                        rec.created_at,
                    ])?;
                }
            }
            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;
    Ok(count)
}

/// List history rows matching the filter, newest first, with pagination.
pub async fn list(
    db: &Database,
    filter: HistoryFilter,
) -> Result<Vec<InquiryRecord>, InquiraError> {
    db.connection()
        .call(move |conn| {
            let mut sql = format!("SELECT {RECORD_COLUMNS} FROM inquiries WHERE 1=1");
            let mut args: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

            if let Some(email) = &filter.email {
                sql.push_str(" AND email = ?");
                args.push(Box::new(email.clone()));
            }
            if let Some(category) = &filter.category {
                sql.push_str(" AND category = ?");
                args.push(Box::new(category.clone()));
            }
            if let Some(from) = &filter.date_from {
                sql.push_str(" AND created_at >= ?");
                args.push(Box::new(from.clone()));
            }
            if let Some(to) = &filter.date_to {
                sql.push_str(" AND created_at <= ?");
                args.push(Box::new(to.clone()));
            }
            sql.push_str(" ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?");
            args.push(Box::new(filter.limit));
            args.push(Box::new(filter.skip));

            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params_from_iter(args.iter().map(|a| a.as_ref())), |row| {
                    row_to_record(row)
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
        .map_err(map_tr_err)
}

/// Fetch one history row by id.
pub async fn get_by_id(db: &Database, id: i64) -> Result<Option<InquiryRecord>, InquiraError> {
    db.connection()
        .call(move |conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {RECORD_COLUMNS} FROM inquiries WHERE id = ?1"))?;
            let record = stmt
                .query_row(params![id], |row| row_to_record(row))
                .optional()?;
            Ok(record)
        })
        .await
        .map_err(map_tr_err)
}

/// Substring search over the selected field(s), newest first.
pub async fn search(
    db: &Database,
    query: &str,
    field: SearchField,
    limit: i64,
) -> Result<Vec<InquiryRecord>, InquiraError> {
    let pattern = format!("%{}%", escape_like(query));
    db.connection()
        .call(move |conn| {
            let where_clause = match field {
                SearchField::Message => "message LIKE ?1 ESCAPE '\\'",
                SearchField::Response => "response LIKE ?1 ESCAPE '\\'",
                SearchField::Email => "email LIKE ?1 ESCAPE '\\'",
                SearchField::All => {
                    "(message LIKE ?1 ESCAPE '\\' OR response LIKE ?1 ESCAPE '\\' \
                     OR email LIKE ?1 ESCAPE '\\')"
                }
            };
            let sql = format!(
                "SELECT {RECORD_COLUMNS} FROM inquiries WHERE {where_clause}
                 ORDER BY created_at DESC, id DESC LIMIT ?2"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params![pattern, limit], |row| row_to_record(row))?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
        .map_err(map_tr_err)
}

/// Aggregate analytics for rows created at or after `since` (ISO 8601).
pub async fn analytics(
    db: &Database,
    since: &str,
    date_range_days: i64,
    top_users_limit: i64,
) -> Result<AnalyticsSummary, InquiraError> {
    let since = since.to_string();
    db.connection()
        .call(move |conn| {
            let total: i64 = conn.query_row(
                "SELECT COUNT(*) FROM inquiries WHERE created_at >= ?1",
                params![since],
                |row| row.get(0),
            )?;

            let mut category_distribution = BTreeMap::new();
            let mut stmt = conn.prepare(
                "SELECT category, COUNT(*) FROM inquiries WHERE created_at >= ?1
                 GROUP BY category",
            )?;
            let rows = stmt.query_map(params![since], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })?;
            for row in rows {
                let (category, count) = row?;
                category_distribution.insert(category, count);
            }

            let mut daily_counts = BTreeMap::new();
            let mut stmt = conn.prepare(
                "SELECT substr(created_at, 1, 10) AS day, COUNT(*)
                 FROM inquiries WHERE created_at >= ?1 GROUP BY day",
            )?;
            let rows = stmt.query_map(params![since], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })?;
            for row in rows {
                let (day, count) = row?;
                daily_counts.insert(day, count);
            }

            let mut top_users = Vec::new();
            let mut stmt = conn.prepare(
                "SELECT email, COUNT(*) AS n FROM inquiries WHERE created_at >= ?1
                 GROUP BY email ORDER BY n DESC, email ASC LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![since, top_users_limit], |row| {
                Ok(TopUser {
                    email: row.get(0)?,
                    count: row.get(1)?,
                })
            })?;
            for row in rows {
                top_users.push(row?);
            }

            Ok(AnalyticsSummary {
                total_inquiries: total,
                date_range_days,
                category_distribution,
                daily_counts,
                top_users,
            })
        })
        .await
        .map_err(map_tr_err)
}

/// Escape LIKE wildcards in user-supplied search text.
fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}
