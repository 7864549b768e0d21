//! Longer text for the docs: installer, usage examples, programmatic access.

use super::CommandSet;

/// Where the installer script is published.
pub const INSTALL_URL: &str = "https://sdrop.io/install.sh";

/// A titled example command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageExample {
    /// What the command does.
    pub title: &'static str,
    /// The command line.
    pub command: &'static str,
}

/// Languages with a programmatic access snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptLanguage {
    /// Node.js with axios and form-data.
    Node,
    /// Python with requests.
    Python,
}

impl CommandSet {
    /// One-line installer invocation.
    pub fn install_command(&self) -> String {
        format!("curl -sf {INSTALL_URL} | sh")
    }

    /// Shell script that installs the CLI into `~/.sdrop`.
    pub fn install_script(&self) -> String {
        r#"#!/bin/bash

# SDROP CLI installer
echo "Installing SDROP CLI..."

mkdir -p ~/.sdrop

curl -o ~/.sdrop/sdrop https://sdrop.io/cli/sdrop
chmod +x ~/.sdrop/sdrop

if [[ ":$PATH:" != *":$HOME/.sdrop:"* ]]; then
  echo 'export PATH="$HOME/.sdrop:$PATH"' >> ~/.bashrc
  echo 'export PATH="$HOME/.sdrop:$PATH"' >> ~/.zshrc
  echo "Added ~/.sdrop to PATH"
fi

echo "SDROP CLI installed successfully!"
echo "Please restart your terminal or run 'source ~/.bashrc' to use the 'sdrop' command."
"#
        .to_string()
    }

    /// Example `sdrop` invocations.
    pub fn cli_usage_examples(&self) -> Vec<UsageExample> {
        vec![
            UsageExample {
                title: "Upload a file",
                command: "sdrop upload file.pdf",
            },
            UsageExample {
                title: "Upload with custom password",
                command: "sdrop upload file.pdf --password mysecretpassword",
            },
            UsageExample {
                title: "Upload with expiry (days)",
                command: "sdrop upload file.pdf --expiry 14",
            },
            UsageExample {
                title: "Download a file",
                command: "sdrop download abc123 --password secretpassword",
            },
            UsageExample {
                title: "Get file info",
                command: "sdrop info abc123",
            },
        ]
    }

    /// Programmatic upload/download snippet in `language`.
    pub fn script_example(&self, language: ScriptLanguage) -> String {
        let template = match language {
            ScriptLanguage::Node => NODE_TEMPLATE,
            ScriptLanguage::Python => PYTHON_TEMPLATE,
        };
        template.replace("{API_BASE}", self.api_base())
    }
}

const NODE_TEMPLATE: &str = r#"// SDROP Node.js example
const fs = require('fs');
const axios = require('axios');
const FormData = require('form-data');

async function uploadFile(filePath, password, expiry = 7) {
  const form = new FormData();
  form.append('file', fs.createReadStream(filePath));
  form.append('password', password);
  form.append('expiry', expiry);

  const response = await axios.post('{API_BASE}/upload', form, {
    headers: form.getHeaders()
  });
  return response.data;
}

async function downloadFile(fileId, password, outputPath) {
  const response = await axios.post(
    `{API_BASE}/files/${fileId}/download`,
    { password },
    { responseType: 'stream' }
  );

  response.data.pipe(fs.createWriteStream(outputPath));

  return new Promise((resolve, reject) => {
    response.data.on('end', () => resolve());
    response.data.on('error', err => reject(err));
  });
}

async function example() {
  const uploadResult = await uploadFile('example.pdf', 'mysecretpassword');
  console.log('File uploaded:', uploadResult);

  await downloadFile(uploadResult.fileId, 'mysecretpassword', 'downloaded-file.pdf');
  console.log('File downloaded successfully');
}

example().catch(error => console.error('Error:', error));
"#;

const PYTHON_TEMPLATE: &str = r#"# SDROP Python example
import requests


def upload_file(file_path, password, expiry=7):
    with open(file_path, 'rb') as file:
        response = requests.post(
            '{API_BASE}/upload',
            files={'file': file},
            data={'password': password, 'expiry': expiry},
        )
        response.raise_for_status()
        return response.json()


def download_file(file_id, password, output_path):
    response = requests.post(
        f'{API_BASE}/files/{file_id}/download',
        json={'password': password},
        stream=True,
    )
    response.raise_for_status()

    with open(output_path, 'wb') as file:
        for chunk in response.iter_content(chunk_size=8192):
            file.write(chunk)


if __name__ == "__main__":
    result = upload_file('example.pdf', 'mysecretpassword')
    print(f"File uploaded: {result}")
    download_file(result['fileId'], 'mysecretpassword', 'downloaded-file.pdf')
    print("File downloaded successfully")
"#;
