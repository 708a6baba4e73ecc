//! Class generator - renders Apex Msg classes and their metadata documents

use std::path::{Path, PathBuf};

use tracing::debug;

use super::field_table::TranscodedField;
use super::naming::{to_class_name, to_record_variable, RECORD_ID_PROPERTY};

const INDENT1: &str = "\t";
const INDENT2: &str = "\t\t";
const INDENT3: &str = "\t\t\t";

/// Everything needed to render one class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSpec {
    /// API name of the source object type
    pub object_type: String,

    /// Ordered field table (see `build_field_table`)
    pub fields: Vec<TranscodedField>,

    /// API version written to the metadata document
    pub api_version: String,
}

/// Rendered class and metadata text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedClass {
    pub class_name: String,
    pub class_body: String,
    pub metadata_document: String,
}

impl ClassSpec {
    pub fn new(object_type: &str, fields: Vec<TranscodedField>, api_version: &str) -> Self {
        Self {
            object_type: object_type.to_string(),
            fields,
            api_version: api_version.to_string(),
        }
    }

    /// Name of the generated class
    pub fn class_name(&self) -> String {
        to_class_name(&self.object_type)
    }
}

/// Render a class spec into the class body and its `-meta.xml` document
pub fn render_class(spec: &ClassSpec) -> RenderedClass {
    let class_name = spec.class_name();
    debug!(
        "Rendering class {} for {} ({} properties)",
        class_name,
        spec.object_type,
        spec.fields.len()
    );

    RenderedClass {
        class_body: render_class_body(spec, &class_name),
        metadata_document: render_metadata(&spec.api_version),
        class_name,
    }
}

fn render_class_body(spec: &ClassSpec, class_name: &str) -> String {
    let object = spec.object_type.as_str();
    let var = to_record_variable(object);
    let mut code = String::new();

    // Class header
    code.push_str(&format!("public with sharing class {} {{\n\n", class_name));
    code.push_str(&format!("{}/**\n", INDENT1));
    code.push_str(&format!(
        "{}Models a {} object. Note that the 'Id' property is mapped to 'recordId'.\n",
        INDENT2, object
    ));
    code.push_str(&format!("{}*/\n", INDENT1));

    // Properties
    for field in &spec.fields {
        code.push_str(&format!(
            "{}public {} {} {{get; set;}}\n",
            INDENT1,
            field.apex_type(),
            field.pretty_name
        ));
    }
    code.push('\n');

    // Default constructor
    code.push_str(&doc_block("Default, parameterless constructor."));
    code.push_str(&format!("{}public {}() {{\n\n", INDENT1, class_name));
    code.push_str(&format!("{}}}\n\n", INDENT1));

    // Constructor from the source record
    code.push_str(&doc_block(
        "Convenience constructor, builds Msg object from the specified custom object.",
    ));
    code.push_str(&format!(
        "{}public {}({} {}) {{\n",
        INDENT1, class_name, object, var
    ));
    code.push_str(&format!("{}this.constructObject({});\n", INDENT2, var));
    code.push_str(&format!("{}}}\n", INDENT1));
    code.push_str(&format!("{}\n\n", INDENT1));

    // constructObject
    code.push_str(&doc_block("Constructs the Msg object from an SObject."));
    code.push_str(&format!(
        "{}private void constructObject({} {}) {{\n",
        INDENT1, object, var
    ));
    for field in &spec.fields {
        code.push_str(&format!(
            "{}this.{} = {}.{};\n",
            INDENT2, field.pretty_name, var, field.raw_name
        ));
    }
    code.push_str(&format!("{}}}\n\n\n", INDENT1));

    // toRecord
    code.push_str(&doc_block(
        "Convenience method for converting a Msg object into its equivalent sobject type.",
    ));
    code.push_str(&format!("{}public {} toRecord() {{\n", INDENT1, object));
    code.push_str(&format!("{}{} {} = new {}();\n", INDENT2, object, var, object));
    for field in &spec.fields {
        if field.pretty_name == RECORD_ID_PROPERTY {
            // Never copy a blank id back onto the record
            code.push_str(&format!(
                "{}if(!String.isBlank(this.{})) {{\n",
                INDENT2, RECORD_ID_PROPERTY
            ));
            code.push_str(&format!(
                "{}{}.{} = this.{};\n",
                INDENT3, var, field.raw_name, RECORD_ID_PROPERTY
            ));
            code.push_str(&format!("{}}}\n", INDENT2));
        } else {
            code.push_str(&format!(
                "{}{}.{} = this.{};\n",
                INDENT2, var, field.raw_name, field.pretty_name
            ));
        }
    }
    code.push_str(&format!("{}return {};\n", INDENT2, var));
    code.push_str(&format!("{}}}\n", INDENT1));

    code.push_str("}\n");
    code
}

fn doc_block(text: &str) -> String {
    format!("{}/**\n{}{}\n{}*/\n", INDENT1, INDENT2, text, INDENT1)
}

/// Render the `-meta.xml` companion document
pub fn render_metadata(api_version: &str) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<ApexClass xmlns=\"http://soap.sforce.com/2006/04/metadata\">\n");
    // Four spaces, the platform's own indentation
    xml.push_str(&format!("    <apiVersion>{}</apiVersion>\n", api_version));
    xml.push_str("    <status>Active</status>\n");
    xml.push_str("</ApexClass>\n");
    xml
}

/// `<project>/src/classes/<ClassName>.cls`
pub fn class_file_path(project_dir: &Path, class_name: &str) -> PathBuf {
    project_dir
        .join("src")
        .join("classes")
        .join(format!("{}.cls", class_name))
}

/// The metadata document sits next to the class file with `-meta.xml` appended
pub fn metadata_file_path(class_path: &Path) -> PathBuf {
    let mut path = class_path.as_os_str().to_owned();
    path.push("-meta.xml");
    PathBuf::from(path)
}
