use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use chrono::Utc;
use tracing::debug;

use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::{Repository, StoreStatus};
use crate::utils::ddb::{is_connectivity_error, parse_date_attribute, parse_item, parse_number_attribute, parse_string_attribute};

#[derive(Debug)]
pub struct DDBBookRepository {
    client: Client,
    table_name: String,
    index_name: String,
    status: StoreStatus,
}

impl DDBBookRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str, status: StoreStatus) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
            status,
        }
    }

    // track records what the client observed about the connection on each call
    fn track<T, E>(&self, res: &Result<T, SdkError<E>>) {
        match res {
            Err(err) if is_connectivity_error(err) => self.status.mark_disconnected(),
            _ => self.status.mark_connected(),
        }
    }

    // Note you cannot use certain reserved words per https://docs.aws.amazon.com/amazondynamodb/latest/developerguide/ReservedWords.html
    // so all attribute names go through expression_attribute_names.
    async fn query(&self, predicate: &HashMap<String, String>) -> LibraryResult<Vec<BookEntity>> {
        let isbn = predicate.get("isbn")
            .ok_or_else(|| LibraryError::validation("isbn is required to query books", None))?;
        let table_name: &str = self.table_name.as_ref();
        let index_name: &str = self.index_name.as_ref();
        let mut names = HashMap::from([("#isbn".to_string(), "isbn".to_string())]);
        let mut values = HashMap::from([(":isbn".to_string(), AttributeValue::S(isbn.to_string()))]);
        let filter_expr = predicate_condition(predicate, Some("isbn"), &mut names, &mut values);
        let mut records = vec![];
        let mut exclusive_start_key: Option<HashMap<String, AttributeValue>> = None;
        loop {
            let res = self.client
                .query()
                .table_name(table_name)
                .index_name(index_name)
                .key_condition_expression("#isbn = :isbn")
                .set_filter_expression(filter_expr.clone())
                .set_expression_attribute_names(Some(names.clone()))
                .set_expression_attribute_values(Some(values.clone()))
                .set_exclusive_start_key(exclusive_start_key.take())
                .send()
                .await;
            self.track(&res);
            let out = res.map_err(LibraryError::from)?;
            let def_items = vec![];
            records.extend(out.items.as_ref().unwrap_or(&def_items).iter().map(map_to_book));
            match out.last_evaluated_key {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key),
                _ => break,
            }
        }
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(records)
    }

    // scan_matching reads the base table with strong consistency, for records the
    // eventually consistent isbn index may not list yet.
    async fn scan_matching(&self, predicate: &HashMap<String, String>) -> LibraryResult<Vec<BookEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let mut names = HashMap::new();
        let mut values = HashMap::new();
        let filter_expr = predicate_condition(predicate, None, &mut names, &mut values)
            .ok_or_else(|| LibraryError::validation("a predicate is required to scan books", None))?;
        let mut records = vec![];
        let mut exclusive_start_key: Option<HashMap<String, AttributeValue>> = None;
        loop {
            let res = self.client
                .scan()
                .table_name(table_name)
                .consistent_read(true)
                .filter_expression(filter_expr.as_str())
                .set_expression_attribute_names(Some(names.clone()))
                .set_expression_attribute_values(Some(values.clone()))
                .set_exclusive_start_key(exclusive_start_key.take())
                .send()
                .await;
            self.track(&res);
            let out = res.map_err(LibraryError::from)?;
            let def_items = vec![];
            records.extend(out.items.as_ref().unwrap_or(&def_items).iter().map(map_to_book));
            match out.last_evaluated_key {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key),
                _ => break,
            }
        }
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(records)
    }
}

#[async_trait]
impl Repository<BookEntity> for DDBBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        let res = self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(book_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await;
        self.track(&res);
        res.map(|_| 1).map_err(LibraryError::from)
    }

    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let mut records = vec![];
        let mut exclusive_start_key: Option<HashMap<String, AttributeValue>> = None;
        loop {
            let res = self.client
                .scan()
                .table_name(table_name)
                .consistent_read(true)
                .set_exclusive_start_key(exclusive_start_key.take())
                .send()
                .await;
            self.track(&res);
            let out = res.map_err(LibraryError::from)?;
            let def_items = vec![];
            records.extend(out.items.as_ref().unwrap_or(&def_items).iter().map(map_to_book));
            match out.last_evaluated_key {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key),
                _ => break,
            }
        }
        // scan order is by partition hash, so restore insertion order
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(records)
    }

    async fn find_one_and_delete(&self, predicate: &HashMap<String, String>) -> LibraryResult<BookEntity> {
        let table_name: &str = self.table_name.as_ref();
        let mut candidates = self.query(predicate).await?;
        if candidates.is_empty() {
            debug!("no index match for {:?}, scanning table", predicate);
            candidates = self.scan_matching(predicate).await?;
        }
        for candidate in candidates {
            let res = self.client
                .delete_item()
                .table_name(table_name)
                .key("book_id", AttributeValue::S(candidate.book_id.clone()))
                .condition_expression("attribute_exists(book_id)")
                .return_values(ReturnValue::AllOld)
                .send()
                .await;
            self.track(&res);
            match res {
                Ok(out) => {
                    if let Some(attrs) = out.attributes() {
                        return Ok(map_to_book(attrs));
                    }
                    return Ok(candidate);
                }
                Err(SdkError::ServiceError(ctx)) if ctx.err().is_conditional_check_failed_exception() => {
                    // another request removed this record first
                    debug!("book {} already deleted, trying next match", candidate.book_id);
                }
                Err(err) => {
                    return Err(LibraryError::from(err));
                }
            }
        }
        Err(LibraryError::not_found(format!("no book matches {:?}", predicate).as_str()))
    }
}

#[async_trait]
impl BookRepository for DDBBookRepository {}

// predicate_condition renders every predicate attribute except `skip` as `#k = :k`,
// adding the placeholders to names and values; None when nothing is left to filter.
fn predicate_condition(predicate: &HashMap<String, String>,
                       skip: Option<&str>,
                       names: &mut HashMap<String, String>,
                       values: &mut HashMap<String, AttributeValue>) -> Option<String> {
    let mut keys: Vec<&String> = predicate.keys().filter(|k| Some(k.as_str()) != skip).collect();
    keys.sort();
    let terms: Vec<String> = keys.into_iter().map(|k| {
        names.insert(format!("#{}", k), k.to_string());
        values.insert(format!(":{}", k), predicate_value(k, &predicate[k]));
        format!("#{} = :{}", k, k)
    }).collect();
    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" AND "))
    }
}

fn predicate_value(name: &str, value: &str) -> AttributeValue {
    match name {
        "pages" => AttributeValue::N(value.to_string()),
        _ => AttributeValue::S(value.to_string()),
    }
}

fn map_to_book(map: &HashMap<String, AttributeValue>) -> BookEntity {
    BookEntity {
        book_id: parse_string_attribute("book_id", map).unwrap_or(String::from("")),
        name: parse_string_attribute("name", map).unwrap_or(String::from("")),
        isbn: parse_string_attribute("isbn", map).unwrap_or(String::from("")),
        author: parse_string_attribute("author", map).unwrap_or(String::from("")),
        pages: parse_number_attribute("pages", map),
        created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
    }
}
