//! StudyShelf CLI
//!
//! Terminal surface for the StudyShelf study-materials service: browse and
//! upload materials, toggle bookmarks, organize collections, author blogs,
//! and moderate pending submissions.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use studyshelf::{
    api::{auth, blogs, collections, contact, courses, faculties, materials},
    client::ApiClient,
    config,
    error::{AppError, Result},
    models::{
        BlogUpdate, Bookmark, CollectionNode, Config, MaterialKind, MaterialQuery, MaterialUpdate,
        NewBlog, NewCollection, NewMaterial, build_tree,
    },
    notify::LogNotifier,
    storage::{BOOKMARKS_KEY, LocalStorage},
    store::{BookmarkStore, Session, SessionStore, ToggleOutcome},
};

/// StudyShelf - university study materials client
#[derive(Parser, Debug)]
#[command(
    name = "studyshelf",
    version,
    about = "StudyShelf study-materials client"
)]
struct Cli {
    /// Path to storage directory containing config and session files
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Log in by exchanging a Google ID token
    GoogleLogin {
        #[arg(long)]
        id_token: String,
    },

    /// Create an account and log in
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Log out and forget the stored session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Request a password-reset email
    RequestPasswordReset {
        #[arg(long)]
        email: String,
    },

    /// Redeem a password-reset token
    ResetPassword {
        #[arg(long)]
        token: String,
        #[arg(long)]
        password: String,
    },

    /// Browse and manage materials
    Materials {
        #[command(subcommand)]
        command: MaterialsCommand,
    },

    /// List your bookmarks
    Bookmarks,

    /// Toggle a bookmark on a material
    Bookmark {
        /// Material id
        material_id: String,
    },

    /// Manage collections
    Collections {
        #[command(subcommand)]
        command: CollectionsCommand,
    },

    /// Read and author blogs
    Blogs {
        #[command(subcommand)]
        command: BlogsCommand,
    },

    /// Moderate pending submissions
    Review {
        #[command(subcommand)]
        command: ReviewCommand,
    },

    /// List courses
    Courses {
        /// Restrict to one department
        #[arg(long)]
        department: Option<String>,
    },

    /// List faculties
    Faculties,

    /// List departments of a faculty
    Departments {
        /// Faculty id
        faculty_id: String,
    },

    /// Send a message through the contact form
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },

    /// Validate configuration files
    Validate,

    /// Show storage and session info
    Info,
}

#[derive(Subcommand, Debug)]
enum MaterialsCommand {
    /// List materials
    List {
        #[arg(long)]
        course: Option<String>,
        #[arg(long)]
        faculty: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        page: Option<u32>,
    },

    /// Show one material
    Show { id: String },

    /// Upload a file or register an external link
    Upload {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Resource kind (pdf, video, image, article, link); guessed when omitted
        #[arg(long)]
        kind: Option<String>,
        #[arg(long)]
        course: Option<String>,
        /// Local file to upload
        #[arg(long, conflicts_with = "url")]
        file: Option<PathBuf>,
        /// External URL to link instead of a file
        #[arg(long)]
        url: Option<String>,
    },

    /// Update a material's metadata
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        course: Option<String>,
    },

    /// Delete a material
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
enum CollectionsCommand {
    /// List your collections as a tree
    List,

    /// Create a collection
    Create {
        name: String,
        #[arg(long)]
        parent: Option<String>,
    },

    /// Rename a collection
    Rename { id: String, name: String },

    /// Delete a collection
    Delete { id: String },

    /// Add a material to a collection
    Add {
        collection_id: String,
        material_id: String,
    },

    /// Remove a material from a collection
    Remove {
        collection_id: String,
        material_id: String,
    },

    /// Move a collection under a new parent (or make it a root)
    Nest {
        id: String,
        #[arg(long, conflicts_with = "clear")]
        parent: Option<String>,
        /// Clear the parent, making the collection a root
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Subcommand, Debug)]
enum BlogsCommand {
    /// List approved blogs
    List {
        #[arg(long)]
        page: Option<u32>,
    },

    /// List your own blogs, whatever their review state
    Mine,

    /// Show one blog
    Show { id: String },

    /// Create a blog post (enters review as pending)
    Create {
        #[arg(long)]
        title: String,
        /// Markdown body, or @path to read it from a file
        #[arg(long)]
        body: String,
    },

    /// Update a blog post
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        /// Markdown body, or @path to read it from a file
        #[arg(long)]
        body: Option<String>,
    },

    /// Delete a blog post
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
enum ReviewCommand {
    /// List pending submissions
    Pending,

    /// Approve a pending submission
    Approve {
        #[arg(long, conflicts_with = "material")]
        blog: Option<String>,
        #[arg(long)]
        material: Option<String>,
    },

    /// Reject a pending submission (comment required)
    Reject {
        #[arg(long, conflicts_with = "material")]
        blog: Option<String>,
        #[arg(long)]
        material: Option<String>,
        #[arg(long)]
        comment: String,
    },
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Load the stored session or explain how to get one.
async fn require_session(sessions: &SessionStore) -> Result<Session> {
    sessions
        .load()
        .await?
        .ok_or_else(|| AppError::auth("Not logged in. Run 'studyshelf login' first."))
}

/// Client carrying the stored session token, if any.
async fn client_with_session(config: &Config, sessions: &SessionStore) -> Result<ApiClient> {
    let token = sessions.load().await?.map(|s| s.token);
    Ok(ApiClient::new(config)?.with_token(token))
}

/// Parse a material kind argument.
fn parse_kind(value: &str) -> Result<MaterialKind> {
    match value {
        "pdf" => Ok(MaterialKind::Pdf),
        "video" => Ok(MaterialKind::Video),
        "image" => Ok(MaterialKind::Image),
        "article" => Ok(MaterialKind::Article),
        "link" => Ok(MaterialKind::Link),
        other => Err(AppError::validation(format!("unknown kind '{other}'"))),
    }
}

/// Guess a kind for a file upload from its content type.
fn guess_kind(path: &std::path::Path) -> MaterialKind {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.essence_str() == "application/pdf" {
        return MaterialKind::Pdf;
    }
    match mime.type_().as_str() {
        "video" => MaterialKind::Video,
        "image" => MaterialKind::Image,
        _ => MaterialKind::Article,
    }
}

/// Resolve `--body text` or `--body @file.md`.
async fn resolve_body(body: &str) -> Result<String> {
    match body.strip_prefix('@') {
        Some(path) => Ok(tokio::fs::read_to_string(path).await?),
        None => Ok(body.to_string()),
    }
}

fn print_collection_tree(nodes: &[CollectionNode], depth: usize) {
    for node in nodes {
        println!(
            "{}{} [{}] ({} materials)",
            "  ".repeat(depth),
            node.collection.name,
            node.collection.id,
            node.collection.material_ids.len()
        );
        print_collection_tree(&node.children, depth + 1);
    }
}

/// Store a fresh login and report who we are now.
async fn finish_login(sessions: &SessionStore, response: auth::AuthResponse) -> Result<()> {
    let session = Session::from_auth(response);
    sessions.save(&session).await?;
    log::info!(
        "Logged in as {} <{}>",
        session.user.name,
        session.user.email
    );
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = config::load(&cli.storage_dir)?;
    let storage = LocalStorage::new(&cli.storage_dir);
    let sessions = SessionStore::new(storage.clone());

    match cli.command {
        Command::Login { email, password } => {
            let client = ApiClient::new(&config)?;
            let response = auth::login(&client, &email, &password).await?;
            finish_login(&sessions, response).await?;
        }

        Command::GoogleLogin { id_token } => {
            let client = ApiClient::new(&config)?;
            let response = auth::google_login(&client, &id_token).await?;
            finish_login(&sessions, response).await?;
        }

        Command::Signup {
            name,
            email,
            password,
        } => {
            let client = ApiClient::new(&config)?;
            let response = auth::signup(&client, &name, &email, &password).await?;
            finish_login(&sessions, response).await?;
        }

        Command::Logout => {
            let client = client_with_session(&config, &sessions).await?;
            if client.has_token() {
                // Best effort: the local session is forgotten either way.
                if let Err(e) = auth::logout(&client).await {
                    log::warn!("Server-side logout failed: {}", e);
                }
            }
            sessions.clear().await?;
            storage.remove(BOOKMARKS_KEY).await?;
            log::info!("Logged out.");
        }

        Command::Whoami => {
            let session = require_session(&sessions).await?;
            let client = client_with_session(&config, &sessions).await?;

            // Last fetch wins over whatever the session file remembers.
            let user = auth::current_user(&client).await?;
            sessions
                .save(&Session {
                    user: user.clone(),
                    ..session
                })
                .await?;
            println!("{} <{}> ({})", user.name, user.email, user.id);
        }

        Command::RequestPasswordReset { email } => {
            let client = ApiClient::new(&config)?;
            auth::request_password_reset(&client, &email).await?;
            log::info!(
                "If an account exists for {}, a reset email is on its way.",
                email
            );
        }

        Command::ResetPassword { token, password } => {
            let client = ApiClient::new(&config)?;
            auth::reset_password(&client, &token, &password).await?;
            log::info!("Password updated. Log in with the new password.");
        }

        Command::Materials { command } => {
            run_materials(command, &config, &sessions).await?;
        }

        Command::Bookmarks => {
            require_session(&sessions).await?;
            let client = client_with_session(&config, &sessions).await?;
            let store = BookmarkStore::new(Arc::new(client), Arc::new(LogNotifier));

            let bookmarks = store.refresh().await?;
            storage.write_json(BOOKMARKS_KEY, &bookmarks).await?;

            if bookmarks.is_empty() {
                println!("No bookmarks yet.");
            }
            for bookmark in &bookmarks {
                println!(
                    "{}  {} [{}]",
                    bookmark.created_at.format("%Y-%m-%d"),
                    bookmark.material_title,
                    bookmark.material_id
                );
            }
        }

        Command::Bookmark { material_id } => {
            require_session(&sessions).await?;
            let client = client_with_session(&config, &sessions).await?;
            let material = materials::get(&client, &material_id).await?;

            let store = BookmarkStore::new(Arc::new(client), Arc::new(LogNotifier));
            match storage.read_json::<Vec<Bookmark>>(BOOKMARKS_KEY).await? {
                Some(cached) => store.seed(cached).await,
                None => {
                    store.refresh().await?;
                }
            }

            let outcome = store.toggle(&material).await;
            storage
                .write_json(BOOKMARKS_KEY, &store.snapshot().await)
                .await?;

            match outcome {
                ToggleOutcome::Added(_) => log::info!("Bookmarked \"{}\"", material.title),
                ToggleOutcome::Removed(_) => {
                    log::info!("Removed bookmark for \"{}\"", material.title)
                }
                ToggleOutcome::Failed(error) => return Err(error),
            }
        }

        Command::Collections { command } => {
            run_collections(command, &config, &sessions).await?;
        }

        Command::Blogs { command } => {
            run_blogs(command, &config, &sessions).await?;
        }

        Command::Review { command } => {
            run_review(command, &config, &sessions).await?;
        }

        Command::Courses { department } => {
            let client = client_with_session(&config, &sessions).await?;
            for course in courses::list(&client, department.as_deref()).await? {
                println!("{}  {} [{}]", course.code, course.title, course.id);
            }
        }

        Command::Faculties => {
            let client = client_with_session(&config, &sessions).await?;
            for faculty in faculties::list(&client).await? {
                println!("{} [{}]", faculty.name, faculty.id);
            }
        }

        Command::Departments { faculty_id } => {
            let client = client_with_session(&config, &sessions).await?;
            for department in faculties::departments(&client, &faculty_id).await? {
                println!("{} [{}]", department.name, department.id);
            }
        }

        Command::Contact {
            name,
            email,
            message,
        } => {
            let client = client_with_session(&config, &sessions).await?;
            let message = contact::ContactMessage {
                name,
                email,
                message,
            };
            contact::send(&client, &message).await?;
            log::info!("Message sent. The team will get back to you by email.");
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            config.validate()?;
            log::info!("✓ Config OK (environment '{}')", config.api.environment);
        }

        Command::Info => {
            log::info!("Storage directory: {}", cli.storage_dir.display());
            log::info!("Environment: {}", config.api.environment);
            match sessions.load().await? {
                Some(session) => log::info!(
                    "Session: {} <{}> (saved {})",
                    session.user.name,
                    session.user.email,
                    session.saved_at.format("%Y-%m-%d %H:%M")
                ),
                None => log::info!("Session: not logged in"),
            }
            let cached: Option<Vec<Bookmark>> = storage.read_json(BOOKMARKS_KEY).await?;
            log::info!("Cached bookmarks: {}", cached.map(|b| b.len()).unwrap_or(0));
        }
    }

    Ok(())
}

async fn run_materials(
    command: MaterialsCommand,
    config: &Config,
    sessions: &SessionStore,
) -> Result<()> {
    let client = client_with_session(config, sessions).await?;

    match command {
        MaterialsCommand::List {
            course,
            faculty,
            search,
            page,
        } => {
            let query = MaterialQuery {
                course_id: course,
                faculty_id: faculty,
                search,
                page,
                per_page: Some(config.paging.per_page),
            };
            let listing = materials::list(&client, &query).await?;
            for material in &listing.items {
                println!(
                    "{:<8} {:<9} {} [{}]",
                    material.kind.as_str(),
                    material.review_status.as_str(),
                    material.title,
                    material.id
                );
            }
            if listing.has_next() {
                log::info!(
                    "{} results total; use --page {} for more",
                    listing.total,
                    listing.page + 1
                );
            }
        }

        MaterialsCommand::Show { id } => {
            let material = materials::get(&client, &id).await?;
            println!("{} [{}]", material.title, material.id);
            println!("  kind:    {}", material.kind.as_str());
            println!("  status:  {}", material.review_status.as_str());
            println!("  url:     {}", material.url);
            if let Some(course) = &material.course_id {
                println!("  course:  {}", course);
            }
            if !material.description.is_empty() {
                println!("  {}", material.description);
            }
        }

        MaterialsCommand::Upload {
            title,
            description,
            kind,
            course,
            file,
            url,
        } => {
            require_session(sessions).await?;
            let material = match (file, url) {
                (Some(path), None) => {
                    let kind = match kind {
                        Some(k) => parse_kind(&k)?,
                        None => guess_kind(&path),
                    };
                    let new = NewMaterial {
                        title,
                        description,
                        kind,
                        url: None,
                        course_id: course,
                    };
                    materials::upload(&client, &new, &path).await?
                }
                (None, Some(link)) => {
                    let kind = match kind {
                        Some(k) => parse_kind(&k)?,
                        None => MaterialKind::Link,
                    };
                    let new = NewMaterial {
                        title,
                        description,
                        kind,
                        url: Some(link),
                        course_id: course,
                    };
                    materials::create_link(&client, &new).await?
                }
                _ => {
                    return Err(AppError::validation(
                        "provide exactly one of --file or --url",
                    ));
                }
            };
            log::info!(
                "Uploaded \"{}\" [{}]; it is pending review.",
                material.title,
                material.id
            );
        }

        MaterialsCommand::Update {
            id,
            title,
            description,
            course,
        } => {
            require_session(sessions).await?;
            let update = MaterialUpdate {
                title,
                description,
                course_id: course,
            };
            let material = materials::update(&client, &id, &update).await?;
            log::info!("Updated \"{}\"", material.title);
        }

        MaterialsCommand::Delete { id } => {
            require_session(sessions).await?;
            materials::delete(&client, &id).await?;
            log::info!("Deleted material {}", id);
        }
    }

    Ok(())
}

async fn run_collections(
    command: CollectionsCommand,
    config: &Config,
    sessions: &SessionStore,
) -> Result<()> {
    require_session(sessions).await?;
    let client = client_with_session(config, sessions).await?;

    match command {
        CollectionsCommand::List => {
            let list = collections::list_mine(&client).await?;
            if list.is_empty() {
                println!("No collections yet.");
            }
            let tree = build_tree(&list);
            print_collection_tree(&tree, 0);
        }

        CollectionsCommand::Create { name, parent } => {
            let new = NewCollection {
                name,
                parent_id: parent,
            };
            let collection = collections::create(&client, &new).await?;
            log::info!(
                "Created collection \"{}\" [{}]",
                collection.name,
                collection.id
            );
        }

        CollectionsCommand::Rename { id, name } => {
            let collection = collections::rename(&client, &id, &name).await?;
            log::info!("Renamed collection to \"{}\"", collection.name);
        }

        CollectionsCommand::Delete { id } => {
            collections::delete(&client, &id).await?;
            log::info!("Deleted collection {}", id);
        }

        CollectionsCommand::Add {
            collection_id,
            material_id,
        } => {
            let collection =
                collections::add_material(&client, &collection_id, &material_id).await?;
            log::info!(
                "Added material to \"{}\" ({} materials)",
                collection.name,
                collection.material_ids.len()
            );
        }

        CollectionsCommand::Remove {
            collection_id,
            material_id,
        } => {
            collections::remove_material(&client, &collection_id, &material_id).await?;
            log::info!("Removed material from collection {}", collection_id);
        }

        CollectionsCommand::Nest { id, parent, clear } => {
            if parent.is_none() && !clear {
                return Err(AppError::validation("provide --parent <id> or --clear"));
            }
            let collection = collections::set_parent(&client, &id, parent.as_deref()).await?;
            match &collection.parent_id {
                Some(parent) => log::info!("Moved \"{}\" under {}", collection.name, parent),
                None => log::info!("\"{}\" is now a root collection", collection.name),
            }
        }
    }

    Ok(())
}

async fn run_blogs(command: BlogsCommand, config: &Config, sessions: &SessionStore) -> Result<()> {
    let client = client_with_session(config, sessions).await?;

    match command {
        BlogsCommand::List { page } => {
            let listing = blogs::list(&client, page).await?;
            for blog in &listing.items {
                println!(
                    "{}  {} [{}]",
                    blog.created_at.format("%Y-%m-%d"),
                    blog.title,
                    blog.id
                );
            }
        }

        BlogsCommand::Mine => {
            require_session(sessions).await?;
            for blog in blogs::list_mine(&client).await? {
                let note = match &blog.review_comment {
                    Some(comment) => format!(" ({})", comment),
                    None => String::new(),
                };
                println!(
                    "{:<9} {} [{}]{}",
                    blog.review_status.as_str(),
                    blog.title,
                    blog.id,
                    note
                );
            }
        }

        BlogsCommand::Show { id } => {
            let blog = blogs::get(&client, &id).await?;
            println!("# {}\n", blog.title);
            println!("{}", blog.body);
        }

        BlogsCommand::Create { title, body } => {
            require_session(sessions).await?;
            let body = resolve_body(&body).await?;
            let blog = blogs::create(&client, &NewBlog { title, body }).await?;
            log::info!(
                "Created \"{}\" [{}]; it is pending review.",
                blog.title,
                blog.id
            );
        }

        BlogsCommand::Update { id, title, body } => {
            require_session(sessions).await?;
            let body = match body {
                Some(body) => Some(resolve_body(&body).await?),
                None => None,
            };
            let update = BlogUpdate { title, body };
            let blog = blogs::update(&client, &id, &update).await?;
            log::info!("Updated \"{}\"", blog.title);
        }

        BlogsCommand::Delete { id } => {
            require_session(sessions).await?;
            blogs::delete(&client, &id).await?;
            log::info!("Deleted blog {}", id);
        }
    }

    Ok(())
}

async fn run_review(
    command: ReviewCommand,
    config: &Config,
    sessions: &SessionStore,
) -> Result<()> {
    let session = require_session(sessions).await?;
    if !session.user.role.can_moderate() {
        return Err(AppError::auth("Moderation requires a moderator account."));
    }
    let client = client_with_session(config, sessions).await?;

    match command {
        ReviewCommand::Pending => {
            let (pending_materials, pending_blogs) = futures::future::try_join(
                materials::list_pending(&client, None),
                blogs::list_pending(&client, None),
            )
            .await?;

            println!("Pending materials ({}):", pending_materials.total);
            for material in &pending_materials.items {
                println!("  {} [{}]", material.title, material.id);
            }
            println!("Pending blogs ({}):", pending_blogs.total);
            for blog in &pending_blogs.items {
                println!("  {} [{}]", blog.title, blog.id);
            }
        }

        ReviewCommand::Approve { blog, material } => match (blog, material) {
            (Some(id), None) => {
                let blog = blogs::approve(&client, &id).await?;
                log::info!("Approved blog \"{}\"", blog.title);
            }
            (None, Some(id)) => {
                let material = materials::approve(&client, &id).await?;
                log::info!("Approved material \"{}\"", material.title);
            }
            _ => {
                return Err(AppError::validation(
                    "provide exactly one of --blog or --material",
                ));
            }
        },

        ReviewCommand::Reject {
            blog,
            material,
            comment,
        } => match (blog, material) {
            (Some(id), None) => {
                let blog = blogs::reject(&client, &id, &comment).await?;
                log::info!("Rejected blog \"{}\"", blog.title);
            }
            (None, Some(id)) => {
                let material = materials::reject(&client, &id, &comment).await?;
                log::info!("Rejected material \"{}\"", material.title);
            }
            _ => {
                return Err(AppError::validation(
                    "provide exactly one of --blog or --material",
                ));
            }
        },
    }

    Ok(())
}
