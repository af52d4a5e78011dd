use crate::domain::checkout::PaymentForm;
use crate::error::Result;
use std::io::Write;

/// Writes a redirect form as `name,value` CSV rows.
///
/// The first two rows carry the form's `action` and `method` under the
/// pseudo-names `@action` and `@method`.
pub struct FormWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> FormWriter<W> {
    pub fn new(destination: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(destination),
        }
    }

    pub fn write_form(&mut self, form: &PaymentForm) -> Result<()> {
        self.writer.write_record(["name", "value"])?;
        self.writer.write_record(["@action", form.action.as_str()])?;
        self.writer.write_record(["@method", form.method])?;
        for field in &form.fields {
            self.writer
                .write_record([field.name.as_str(), field.value.as_str()])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
