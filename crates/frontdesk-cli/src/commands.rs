//! One handler per desk action. Output is tab-separated text on stdout;
//! absorbed persistence problems are printed to stderr.

use std::io::{self, BufRead, Write};

use anyhow::{Context as _, anyhow, ensure};
use frontdesk_core::{
  Outcome,
  badge::BadgeId,
  time::format_timestamp,
  visitor::{NewVisitor, VisitorId, VisitorRecord},
};
use frontdesk_store_json::SmtpConfig;

use crate::{
  BadgeCommand, CheckInArgs, Command, HistoryCommand, SmtpCommand,
  config::AppConfig, desk::Desk, export,
};

pub async fn run(desk: &mut Desk, cfg: &AppConfig, command: Command) -> anyhow::Result<()> {
  match command {
    Command::CheckIn(args) => check_in(desk, args).await,
    Command::CheckOut { id } => {
      let outcome = desk.check_out(&VisitorId::from(id)).await?;
      let out = report(outcome);
      println!(
        "checked out {}\t{}\t{}",
        out.visitor.id,
        out.visitor.name,
        format_timestamp(out.time_out)
      );
      Ok(())
    }
    Command::CheckOutAll { yes } => {
      if desk.list().is_empty() {
        println!("No guests are currently checked in.");
        return Ok(());
      }
      if !yes && !confirm("Check out all currently active guests?")? {
        return Ok(());
      }
      let count = report(desk.check_out_all().await);
      println!("checked out {count} guest(s)");
      Ok(())
    }
    Command::List { search } => {
      for record in desk.search(search.as_deref().unwrap_or("")) {
        print_visitor(record);
      }
      Ok(())
    }
    Command::Badges { command } => badges(desk, command).await,
    Command::History { command: HistoryCommand::Export { file } } => {
      let rows = desk.history().await?;
      let out = std::fs::File::create(&file)
        .with_context(|| format!("failed to create {}", file.display()))?;
      export::write_history_csv(out, &rows)
        .with_context(|| format!("failed to write {}", file.display()))?;
      println!("exported {} visit(s) to {}", rows.len(), file.display());
      Ok(())
    }
    Command::Smtp { command } => smtp(cfg, command).await,
  }
}

async fn check_in(desk: &mut Desk, args: CheckInArgs) -> anyhow::Result<()> {
  for path in args.face.iter().chain(&args.license) {
    ensure!(path.is_file(), "capture not found: {}", path.display());
  }

  let input = NewVisitor {
    name:                args.name,
    company:             args.company,
    badge_id:            args.badge,
    reason_of_visit:     args.reason,
    area:                args.area,
    face_file:           args.face,
    driver_license_file: args.license,
  };
  let record = report(desk.check_in(input).await?);
  println!("checked in {}\t{}", record.id, record.name);
  Ok(())
}

async fn badges(desk: &Desk, command: BadgeCommand) -> anyhow::Result<()> {
  match command {
    BadgeCommand::Available => {
      for number in desk.available_badges().await? {
        println!("{number}");
      }
    }
    BadgeCommand::Add { number, category } => {
      let category = match category {
        Some(c) => c,
        None => desk
          .categories()
          .first()
          .map(str::to_owned)
          .ok_or_else(|| anyhow!("no badge categories configured"))?,
      };
      let badge = desk.log_badge(&number, &category).await?;
      println!("added {}\t{}\t{}", badge.id, badge.badge_number, badge.category);
    }
    BadgeCommand::List { category } => {
      for badge in desk.list_badges(category.as_deref()).await? {
        println!(
          "{}\t{}\t{}\t{}",
          badge.id,
          badge.badge_number,
          badge.category,
          format_timestamp(badge.created_at)
        );
      }
    }
    BadgeCommand::Delete { id } => {
      desk.delete_badge(BadgeId(id)).await?;
      println!("deleted badge {id}");
    }
  }
  Ok(())
}

async fn smtp(cfg: &AppConfig, command: SmtpCommand) -> anyhow::Result<()> {
  let path = cfg.smtp_path();
  let mut settings = SmtpConfig::load(&path).await;

  match command {
    SmtpCommand::Show => {}
    SmtpCommand::Set { server, port, email, password } => {
      if let Some(server) = server {
        settings.smtp_server = server.trim().to_owned();
      }
      if let Some(port) = port {
        settings.smtp_port = port;
      }
      if let Some(email) = email {
        settings.sender_email = email.trim().to_owned();
      }
      if let Some(password) = password {
        settings.sender_password = password.trim().to_owned();
      }
      settings.save(&path).await?;
      tracing::info!(path = %path.display(), "saved SMTP settings");
    }
  }

  println!("smtp_server\t{}", settings.smtp_server);
  println!("smtp_port\t{}", settings.smtp_port);
  println!("sender_email\t{}", settings.sender_email);
  let hidden = if settings.sender_password.is_empty() { "" } else { "********" };
  println!("sender_password\t{hidden}");
  Ok(())
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Print any absorbed problems and hand back the value.
fn report<T>(outcome: Outcome<T>) -> T {
  for problem in &outcome.problems {
    eprintln!("warning: {problem}");
  }
  outcome.value
}

fn print_visitor(r: &VisitorRecord) {
  println!(
    "{}\t{}\t{}\t{}\t{}\t{}\t{}",
    r.id,
    r.name,
    r.company,
    format_timestamp(r.time_in),
    r.badge_id.as_deref().unwrap_or(""),
    r.area,
    r.reason_of_visit
  );
}

/// Ask a yes/no question on stdin; anything but `y`/`yes` is no.
fn confirm(question: &str) -> anyhow::Result<bool> {
  print!("{question} [y/N] ");
  io::stdout().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}
