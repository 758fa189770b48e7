//! MySQL dialect.

use super::{quote_literal, sql::SqlDialect};
use crate::{Result, models::Engine, request::RequestDescriptor};

/// MySQL catalog queries, scoped to the requested database.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySql;

fn schema_filter(descriptor: &RequestDescriptor) -> String {
    descriptor
        .database_name()
        .map_or_else(|| "DATABASE()".to_string(), |name| format!("'{}'", quote_literal(name)))
}

impl SqlDialect for MySql {
    const ENGINE: Engine = Engine::MySql;

    fn connection_url(descriptor: &RequestDescriptor) -> Result<String> {
        descriptor.require_connection_string().map(str::to_string)
    }

    fn tables_query(descriptor: &RequestDescriptor) -> Result<String> {
        let database = descriptor.require_database_name()?;
        Ok(format!(
            "SELECT CAST(table_name AS CHAR) FROM information_schema.tables \
            WHERE table_schema = '{}' ORDER BY table_name",
            quote_literal(database)
        ))
    }

    fn table_info_query(descriptor: &RequestDescriptor, table: &str) -> Result<String> {
        Ok(format!(
            "SELECT CAST(UPPER(c.column_name) AS CHAR) AS column_name, \
                CAST(c.data_type AS CHAR) AS data_type, \
                CAST(c.is_nullable AS CHAR) AS nullable, \
                COALESCE(CAST(c.character_maximum_length AS CHAR), '-') AS length, \
                CAST(c.column_key AS CHAR) AS column_key, \
                COALESCE(CAST(c.column_default AS CHAR), '-') AS default_value \
            FROM information_schema.columns c \
            WHERE c.table_schema = {} AND LOWER(c.table_name) = LOWER('{}') \
            ORDER BY c.ordinal_position",
            schema_filter(descriptor),
            quote_literal(table)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::TabulaError, request::RequestFlags};

    fn descriptor(db_name: Option<&str>) -> RequestDescriptor {
        RequestDescriptor::build(&RequestFlags {
            engine: Some("mysql".to_string()),
            conn_str: Some("mysql://root@localhost:3306/shop".to_string()),
            db_name: db_name.map(str::to_string),
            ..RequestFlags::default()
        })
        .unwrap()
    }

    #[test]
    fn test_tables_query_filters_by_database() {
        let query = MySql::tables_query(&descriptor(Some("shop"))).unwrap();
        assert!(query.contains("table_schema = 'shop'"));
    }

    #[test]
    fn test_tables_query_requires_database_name() {
        assert!(matches!(
            MySql::tables_query(&descriptor(None)),
            Err(TabulaError::MissingRequiredField {
                field: "database name"
            })
        ));
    }

    #[test]
    fn test_table_info_query_schema() {
        let query = MySql::table_info_query(&descriptor(None), "orders").unwrap();
        assert!(query.contains("c.table_schema = DATABASE()"));
        assert!(query.contains("LOWER('orders')"));

        let query = MySql::table_info_query(&descriptor(Some("shop")), "orders").unwrap();
        assert!(query.contains("c.table_schema = 'shop'"));
    }

    #[test]
    fn test_connection_url_is_verbatim() {
        let url = MySql::connection_url(&descriptor(None)).unwrap();
        assert_eq!(url, "mysql://root@localhost:3306/shop");
    }
}
