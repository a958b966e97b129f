//! sitecontent-admin CLI entry point.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use sitecontent_client::cli::{Cli, Commands, OutputFormat};
use sitecontent_client::console::{
    EventBoard, EventForm, Notifications, SectionEditor, SectionForm, SlotBoard, SlotForm,
    SlotOutcome,
};
use sitecontent_client::media::{HttpMediaStore, ImageFile, MediaStore};
use sitecontent_client::output::{format_output, pretty};
use sitecontent_client::{ClientError, ContentApi, ContentClient};
use sitecontent_core::content::{
    EventDetails, EventFilter, FaqPayload, ItemPayload, SectionPayload, TestimonialPayload,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sitecontent_client=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let client = ContentClient::new(&cli.base_url);
    let notification_ttl = Duration::from_millis(cli.notification_ttl_ms);

    match cli.command {
        Commands::Content(content_cmd) => {
            use sitecontent_client::cli::content::ContentAction;
            match content_cmd.action {
                ContentAction::All => {
                    let content = client.all_content().await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&content, cli.format)),
                        OutputFormat::Pretty => {
                            println!("{}", pretty::format_all_content(&content))
                        }
                    }
                }
                ContentAction::Admin => {
                    let content = client.admin_content().await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&content, cli.format)),
                        OutputFormat::Pretty => {
                            println!("{}", pretty::format_all_content(&content))
                        }
                    }
                }
                ContentAction::Section { key } => {
                    let content = client.section_content(&key).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&content, cli.format)),
                        OutputFormat::Pretty => {
                            println!("{}", pretty::format_section_content(&content))
                        }
                    }
                }
            }
        }
        Commands::Sections(sections_cmd) => {
            use sitecontent_client::cli::sections::SectionsAction;
            match sections_cmd.action {
                SectionsAction::Create {
                    key,
                    title,
                    content,
                    display_order,
                    metadata,
                    inactive,
                } => {
                    let mut payload = SectionPayload::new(key, title).with_active(!inactive);
                    payload.metadata = metadata;
                    if let Some(content) = content {
                        payload = payload.with_content(content);
                    }
                    if let Some(order) = display_order {
                        payload = payload.with_display_order(order);
                    }
                    let section = client.create_section(&payload).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&section, cli.format)),
                        OutputFormat::Pretty => {
                            println!("Created:\n{}", pretty::format_section(&section))
                        }
                    }
                }
                SectionsAction::Update {
                    id,
                    key,
                    title,
                    content,
                    display_order,
                    metadata,
                    active,
                } => {
                    let existing = client
                        .admin_content()
                        .await?
                        .sections
                        .into_iter()
                        .find(|s| s.id == id)
                        .ok_or_else(|| ClientError::NotFound {
                            resource: format!("content section {id}"),
                        })?;
                    let mut payload = SectionPayload::from_section(&existing);
                    if key.is_some() {
                        payload.key = key;
                    }
                    if title.is_some() {
                        payload.title = title;
                    }
                    if let Some(content) = content {
                        payload = payload.with_content(content);
                    }
                    if let Some(order) = display_order {
                        payload = payload.with_display_order(order);
                    }
                    if let Some(active) = active {
                        payload = payload.with_active(active);
                    }
                    if metadata.is_some() {
                        payload.metadata = metadata;
                    }
                    let section = client.update_section(id, &payload).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&section, cli.format)),
                        OutputFormat::Pretty => {
                            println!("Updated:\n{}", pretty::format_section(&section))
                        }
                    }
                }
                SectionsAction::Delete { id } => {
                    client.delete_section(id).await?;
                    if !cli.quiet {
                        println!("Deleted section {}", id);
                    }
                }
            }
        }
        Commands::Items(items_cmd) => {
            use sitecontent_client::cli::items::ItemsAction;
            match items_cmd.action {
                ItemsAction::Create {
                    section_id,
                    title,
                    description,
                    image_url,
                    link_url,
                    display_order,
                    metadata,
                    inactive,
                } => {
                    let mut payload = ItemPayload::new(section_id, title)
                        .with_description(description)
                        .with_image_url(image_url)
                        .with_active(!inactive);
                    payload.link_url = link_url.map(Some);
                    payload.metadata = metadata;
                    if let Some(order) = display_order {
                        payload = payload.with_display_order(order);
                    }
                    let item = client.create_item(&payload).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&item, cli.format)),
                        OutputFormat::Pretty => {
                            println!("Created:\n{}", pretty::format_item(&item))
                        }
                    }
                }
                ItemsAction::Update {
                    id,
                    title,
                    description,
                    image_url,
                    link_url,
                    display_order,
                    metadata,
                    active,
                } => {
                    let existing = client
                        .admin_content()
                        .await?
                        .items
                        .into_iter()
                        .find(|i| i.id == id)
                        .ok_or_else(|| ClientError::NotFound {
                            resource: format!("content item {id}"),
                        })?;
                    let mut payload = ItemPayload::from_item(&existing);
                    if title.is_some() {
                        payload.title = title;
                    }
                    if description.is_some() {
                        payload = payload.with_description(description);
                    }
                    if image_url.is_some() {
                        payload = payload.with_image_url(image_url);
                    }
                    if let Some(link) = link_url {
                        payload.link_url = Some(Some(link));
                    }
                    if let Some(order) = display_order {
                        payload = payload.with_display_order(order);
                    }
                    if let Some(active) = active {
                        payload = payload.with_active(active);
                    }
                    if metadata.is_some() {
                        payload.metadata = metadata;
                    }
                    let item = client.update_item(id, &payload).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&item, cli.format)),
                        OutputFormat::Pretty => {
                            println!("Updated:\n{}", pretty::format_item(&item))
                        }
                    }
                }
                ItemsAction::Delete { id } => {
                    client.delete_item(id).await?;
                    if !cli.quiet {
                        println!("Deleted item {}", id);
                    }
                }
            }
        }
        Commands::Testimonials(testimonials_cmd) => {
            use sitecontent_client::cli::testimonials::TestimonialsAction;
            match testimonials_cmd.action {
                TestimonialsAction::Create {
                    name,
                    content,
                    position,
                    company,
                    rating,
                    display_order,
                } => {
                    let mut payload = TestimonialPayload::new(name, content);
                    payload.position = position.map(Some);
                    payload.company = company.map(Some);
                    payload.rating = rating.map(Some);
                    payload.display_order = display_order;
                    let testimonial = client.create_testimonial(&payload).await?;
                    match cli.format {
                        OutputFormat::Json => {
                            println!("{}", format_output(&testimonial, cli.format))
                        }
                        OutputFormat::Pretty => {
                            println!("Created:\n{}", pretty::format_testimonial(&testimonial))
                        }
                    }
                }
                TestimonialsAction::Update {
                    id,
                    name,
                    content,
                    rating,
                    active,
                } => {
                    let existing = client
                        .admin_content()
                        .await?
                        .testimonials
                        .into_iter()
                        .find(|t| t.id == id)
                        .ok_or_else(|| ClientError::NotFound {
                            resource: format!("testimonial {id}"),
                        })?;
                    let mut payload = TestimonialPayload::from_testimonial(&existing);
                    if name.is_some() {
                        payload.name = name;
                    }
                    if content.is_some() {
                        payload.content = content;
                    }
                    if let Some(rating) = rating {
                        payload.rating = Some(Some(rating));
                    }
                    if active.is_some() {
                        payload.is_active = active;
                    }
                    let testimonial = client.update_testimonial(id, &payload).await?;
                    match cli.format {
                        OutputFormat::Json => {
                            println!("{}", format_output(&testimonial, cli.format))
                        }
                        OutputFormat::Pretty => {
                            println!("Updated:\n{}", pretty::format_testimonial(&testimonial))
                        }
                    }
                }
                TestimonialsAction::Delete { id } => {
                    client.delete_testimonial(id).await?;
                    if !cli.quiet {
                        println!("Deleted testimonial {}", id);
                    }
                }
            }
        }
        Commands::Faqs(faqs_cmd) => {
            use sitecontent_client::cli::faqs::FaqsAction;
            match faqs_cmd.action {
                FaqsAction::Create {
                    question,
                    answer,
                    category,
                    display_order,
                } => {
                    let mut payload = FaqPayload::new(question, answer);
                    payload.category = category.map(Some);
                    payload.display_order = display_order;
                    let faq = client.create_faq(&payload).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&faq, cli.format)),
                        OutputFormat::Pretty => println!("Created:\n{}", pretty::format_faq(&faq)),
                    }
                }
                FaqsAction::Update {
                    id,
                    question,
                    answer,
                    category,
                    active,
                } => {
                    let existing = client
                        .admin_content()
                        .await?
                        .faqs
                        .into_iter()
                        .find(|f| f.id == id)
                        .ok_or_else(|| ClientError::NotFound {
                            resource: format!("faq {id}"),
                        })?;
                    let mut payload = FaqPayload::from_faq(&existing);
                    if question.is_some() {
                        payload.question = question;
                    }
                    if answer.is_some() {
                        payload.answer = answer;
                    }
                    if let Some(category) = category {
                        payload.category = Some(Some(category));
                    }
                    if active.is_some() {
                        payload.is_active = active;
                    }
                    let faq = client.update_faq(id, &payload).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&faq, cli.format)),
                        OutputFormat::Pretty => println!("Updated:\n{}", pretty::format_faq(&faq)),
                    }
                }
                FaqsAction::Delete { id } => {
                    client.delete_faq(id).await?;
                    if !cli.quiet {
                        println!("Deleted faq {}", id);
                    }
                }
            }
        }
        Commands::Slots(slots_cmd) => {
            use sitecontent_client::cli::slots::SlotsAction;
            let api: Arc<dyn ContentApi> = Arc::new(client);
            let media: Arc<dyn MediaStore> = Arc::new(HttpMediaStore::new(&cli.media_url));
            let mut board = SlotBoard::load(
                api,
                media,
                &slots_cmd.section,
                slots_cmd.count,
                Notifications::new(notification_ttl),
            )
            .await?;

            match slots_cmd.action {
                SlotsAction::Show => {
                    let view = board.view();
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&view, cli.format)),
                        OutputFormat::Pretty => println!("{}", pretty::format_slots(&view)),
                    }
                    if !cli.quiet && !board.duplicates().is_empty() {
                        eprintln!(
                            "Warning: {} item(s) share a slot's display order and are hidden",
                            board.duplicates().len()
                        );
                    }
                }
                SlotsAction::Save {
                    slot,
                    title,
                    description,
                    link_url,
                    image,
                } => {
                    let form = SlotForm {
                        title,
                        description,
                        link_url,
                        image: image.map(ImageFile::from_path).transpose()?,
                    };
                    let outcome = board.submit_slot(slot, form).await;
                    if !cli.quiet {
                        if let Some(notification) = board.notifications().last() {
                            eprintln!("{}", notification.message);
                        }
                    }
                    match outcome {
                        SlotOutcome::Saved { ref item, .. } => match cli.format {
                            OutputFormat::Json => println!("{}", format_output(item, cli.format)),
                            OutputFormat::Pretty => {
                                println!("{}", pretty::format_slot_outcome(&outcome))
                            }
                        },
                        SlotOutcome::Failed { error, .. } => return Err(error.into()),
                    }
                }
                SlotsAction::RemoveImage { slot } => {
                    let result = board.remove_slot_image(slot).await;
                    if !cli.quiet {
                        if let Some(notification) = board.notifications().last() {
                            eprintln!("{}", notification.message);
                        }
                    }
                    let item = result?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&item, cli.format)),
                        OutputFormat::Pretty => println!("{}", pretty::format_item(&item)),
                    }
                }
            }
        }
        Commands::Section(section_cmd) => {
            use sitecontent_client::cli::section::SectionAction;
            match section_cmd.action {
                SectionAction::Save {
                    key,
                    title,
                    content,
                    image,
                    active,
                } => {
                    let api: Arc<dyn ContentApi> = Arc::new(client);
                    let media: Arc<dyn MediaStore> =
                        Arc::new(HttpMediaStore::new(&cli.media_url));
                    let mut editor =
                        SectionEditor::load(api, media, &key, Notifications::new(notification_ttl))
                            .await?;
                    let form = SectionForm {
                        title,
                        content,
                        is_active: active,
                        image: image.map(ImageFile::from_path).transpose()?,
                    };
                    let result = editor.save_section(form).await;
                    if !cli.quiet {
                        if let Some(notification) = editor.notifications().last() {
                            eprintln!("{}", notification.message);
                        }
                    }
                    let saved = result?;
                    match cli.format {
                        OutputFormat::Json => {
                            println!("{}", format_output(&saved.section, cli.format))
                        }
                        OutputFormat::Pretty => {
                            println!("{}", pretty::format_section(&saved.section));
                            if let Some(line) = pretty::format_cleanup(&saved.cleanup) {
                                println!("{}", line);
                            }
                        }
                    }
                }
            }
        }
        Commands::Events(events_cmd) => {
            use sitecontent_client::cli::events::EventsAction;
            let api: Arc<dyn ContentApi> = Arc::new(client);
            let media: Arc<dyn MediaStore> = Arc::new(HttpMediaStore::new(&cli.media_url));
            let mut board = EventBoard::load(api, media, Notifications::new(notification_ttl)).await?;

            match events_cmd.action {
                EventsAction::List { search, status } => {
                    let filter = EventFilter {
                        search,
                        status: status.into(),
                    };
                    let events = board.filtered(&filter);
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&events, cli.format)),
                        OutputFormat::Pretty => {
                            println!("{}", pretty::format_events(&events, &board.stats()))
                        }
                    }
                }
                EventsAction::Create {
                    title,
                    description,
                    link_url,
                    details,
                    image,
                    display_order,
                    inactive,
                } => {
                    let form = EventForm {
                        title: Some(title),
                        description,
                        link_url,
                        is_active: Some(!inactive),
                        display_order,
                        details: EventDetails::from(details),
                        image: image.map(ImageFile::from_path).transpose()?,
                    };
                    let result = board.create_event(form).await;
                    if !cli.quiet {
                        if let Some(notification) = board.notifications().last() {
                            eprintln!("{}", notification.message);
                        }
                    }
                    let saved = result?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&saved.item, cli.format)),
                        OutputFormat::Pretty => println!("{}", pretty::format_event(&saved.item)),
                    }
                }
                EventsAction::Update {
                    id,
                    title,
                    description,
                    link_url,
                    details,
                    image,
                    display_order,
                    active,
                } => {
                    let form = EventForm {
                        title,
                        description,
                        link_url,
                        is_active: active,
                        display_order,
                        details: EventDetails::from(details),
                        image: image.map(ImageFile::from_path).transpose()?,
                    };
                    let result = board.update_event(id, form).await;
                    if !cli.quiet {
                        if let Some(notification) = board.notifications().last() {
                            eprintln!("{}", notification.message);
                        }
                    }
                    let saved = result?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&saved.item, cli.format)),
                        OutputFormat::Pretty => {
                            println!("{}", pretty::format_event(&saved.item));
                            if let Some(line) = pretty::format_cleanup(&saved.cleanup) {
                                println!("{}", line);
                            }
                        }
                    }
                }
                EventsAction::Delete { id } => {
                    let result = board.delete_event(id).await;
                    if !cli.quiet {
                        if let Some(notification) = board.notifications().last() {
                            eprintln!("{}", notification.message);
                        }
                    }
                    result?;
                }
            }
        }
    }

    Ok(())
}
