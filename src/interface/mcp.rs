//! MCP Server for library-mcp
//!
//! MCP Protocol (stdio) <-> application::BookStore
//!
//! 5 tools: add_book, remove_book, search_books, list_books, statistics

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use rmcp::{
    handler::server::{tool::ToolCallContext, tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolRequestParams, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
    transport::stdio,
    ErrorData as McpError, ServerHandler, ServiceExt,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::application::error::AppError;
use crate::application::report;
use crate::application::service::BookStore;
use crate::infra::json_store::JsonCatalogRepository;

/// 入力フォームで受け付ける出版年の範囲
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1000..=2100;

// =============================================================================
// Public entry point
// =============================================================================

/// MCP Serverを起動する。catalog_pathは蔵書JSONファイル。
pub async fn run(catalog_path: PathBuf) -> anyhow::Result<()> {
    tracing::info!(path = %catalog_path.display(), "starting library-mcp");
    let server = LibraryMcpServer::new(catalog_path);
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}

// =============================================================================
// MCP Server
// =============================================================================

#[derive(Clone)]
struct LibraryMcpServer {
    store: Arc<Mutex<BookStore<JsonCatalogRepository>>>,
    tool_router: ToolRouter<Self>,
}

impl LibraryMcpServer {
    fn new(catalog_path: PathBuf) -> Self {
        let store = BookStore::open(JsonCatalogRepository::new(catalog_path));
        Self {
            store: Arc::new(Mutex::new(store)),
            tool_router: Self::tool_router(),
        }
    }

    fn store(&self) -> Result<MutexGuard<'_, BookStore<JsonCatalogRepository>>, McpError> {
        self.store
            .lock()
            .map_err(|_| McpError::internal_error("Lock poisoned", None))
    }

    fn to_mcp_error(e: AppError) -> McpError {
        McpError::internal_error(format!("{e}"), None)
    }
}

// =============================================================================
// ServerHandler impl
// =============================================================================

impl ServerHandler for LibraryMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "library-mcp".to_string(),
                title: Some("Library MCP — Personal Book Catalog".to_string()),
                description: Some(
                    "Personal book catalog stored in a single JSON file. \
                     Add, remove, search, list, and summarize your books."
                        .to_string(),
                ),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Manage a personal library of books.\n\
                 \n\
                 Each book has a title, author, publication year, genre, and read status. \
                 Titles are not unique: `remove_book` deletes every book with a matching title \
                 (case-insensitive).\n\
                 \n\
                 Tools: `add_book`, `remove_book`, `search_books`, `list_books`, `statistics`."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = %request.name, "call_tool");
        let tool_ctx = ToolCallContext::new(self, request, context);
        self.tool_router.call(tool_ctx).await
    }
}

// =============================================================================
// Request types
// =============================================================================

fn validate_year(year: i32) -> Result<(), McpError> {
    if !YEAR_RANGE.contains(&year) {
        return Err(McpError::invalid_params(
            format!(
                "year must be between {} and {}, got {year}",
                YEAR_RANGE.start(),
                YEAR_RANGE.end()
            ),
            None,
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpAddBookRequest {
    #[schemars(description = "Book title. Stored as given; empty is allowed.")]
    pub title: String,
    #[schemars(description = "Author name")]
    pub author: String,
    #[schemars(description = "Publication year (1000-2100)")]
    pub year: i32,
    #[schemars(description = "Genre (e.g. 'Fantasy', 'Science Fiction')")]
    pub genre: String,
    #[schemars(description = "Whether you have read it (default: false)")]
    #[serde(default)]
    pub read_status: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpRemoveBookRequest {
    #[schemars(description = "Title of the book(s) to remove. Case-insensitive exact match.")]
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpSearchBooksRequest {
    #[schemars(
        description = "Keyword matched case-insensitively against title and author. Empty matches all."
    )]
    pub keyword: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpEmptyRequest {}

// =============================================================================
// Tool implementations
// =============================================================================

#[tool_router]
impl LibraryMcpServer {
    #[tool(
        name = "add_book",
        description = "Add a book to the library. Duplicates are allowed.",
        annotations(
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = false,
            open_world_hint = false
        )
    )]
    async fn add_book(
        &self,
        Parameters(req): Parameters<McpAddBookRequest>,
    ) -> Result<CallToolResult, McpError> {
        validate_year(req.year)?;

        let mut store = self.store()?;
        store
            .add(
                req.title.clone(),
                req.author.clone(),
                req.year,
                req.genre,
                req.read_status,
            )
            .map_err(Self::to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(format!(
            "Added: **{}** by {}",
            req.title, req.author
        ))]))
    }

    #[tool(
        name = "remove_book",
        description = "Remove every book whose title matches (case-insensitive). Succeeds even if nothing matched.",
        annotations(
            read_only_hint = false,
            destructive_hint = true,
            idempotent_hint = true,
            open_world_hint = false
        )
    )]
    async fn remove_book(
        &self,
        Parameters(req): Parameters<McpRemoveBookRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut store = self.store()?;
        let removed = store.remove(&req.title).map_err(Self::to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(format!(
            "Removed {removed} book(s) titled '{}'",
            req.title
        ))]))
    }

    #[tool(
        name = "search_books",
        description = "Search books by keyword in title or author (case-insensitive substring).",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            open_world_hint = false
        )
    )]
    async fn search_books(
        &self,
        Parameters(req): Parameters<McpSearchBooksRequest>,
    ) -> Result<CallToolResult, McpError> {
        let store = self.store()?;
        let results = store.search(&req.keyword);
        Ok(CallToolResult::success(vec![Content::text(
            report::render_search(&req.keyword, &results),
        )]))
    }

    #[tool(
        name = "list_books",
        description = "List all books in insertion order.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            open_world_hint = false
        )
    )]
    async fn list_books(
        &self,
        #[allow(unused_variables)] Parameters(_req): Parameters<McpEmptyRequest>,
    ) -> Result<CallToolResult, McpError> {
        let store = self.store()?;
        Ok(CallToolResult::success(vec![Content::text(
            report::render_listing(store.books()),
        )]))
    }

    #[tool(
        name = "statistics",
        description = "Show total books, books read, and percentage read.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            open_world_hint = false
        )
    )]
    async fn statistics(
        &self,
        #[allow(unused_variables)] Parameters(_req): Parameters<McpEmptyRequest>,
    ) -> Result<CallToolResult, McpError> {
        let store = self.store()?;
        Ok(CallToolResult::success(vec![Content::text(
            report::render_statistics(&store.statistics()),
        )]))
    }
}

// =============================================================================
// Tests
// =============================================================================
