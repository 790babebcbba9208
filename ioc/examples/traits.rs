use fibre_little::{global, resolve, Class, Factory, Value};
use std::sync::Arc;

// --- Abstraction and Implementations ---
trait MessageSender: Send + Sync {
  fn send(&self, to: &str, message: &str) -> String;
}

#[derive(Default)]
struct EmailSender;
impl MessageSender for EmailSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending email to {}: '{}'", to, message)
  }
}

struct SmsSender;
impl MessageSender for SmsSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending SMS to {}: '{}'", to, message)
  }
}

fibre_little::reflect!(EmailSender);

fn main() {
  // --- Registration ---
  global().register::<EmailSender>();
  global().register_class(Class::interface::<dyn MessageSender>());

  // The unnamed trait identifier resolves to a shared EmailSender.
  global().bind_trait::<dyn MessageSender, EmailSender>(|e| e as Arc<dyn MessageSender>, true);
  // A named alternative.
  global().singleton(
    "sms",
    Factory::new(|_| Ok(Value::from_arc(Arc::new(SmsSender) as Arc<dyn MessageSender>))),
  );

  // --- Resolution ---
  let email_notifier = resolve!(trait MessageSender);
  let sms_notifier = resolve!(trait MessageSender, "sms");

  let result1 = email_notifier.send("test@example.com", "Hello from Fibre!");
  let result2 = sms_notifier.send("+123456789", "Hello from Fibre!");

  println!("{}", result1);
  println!("{}", result2);

  assert!(result1.contains("email"));
  assert!(result2.contains("SMS"));
}
