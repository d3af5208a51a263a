//! Built-in renderer preferences.
//!
//! Each row maps a family of media types to the utilities tried for them,
//! most preferred first.

const TEXT: &[&str] = &[
	"bat --color=always --paging=never --style=plain --terminal-width=$TVIEW_WIDTH {}",
	"cat",
	"xxd",
];

const IMAGE: &[&str] = &[
	"chafa --size=${TVIEW_WIDTH}x${TVIEW_HEIGHT} {}",
	"viu -w $TVIEW_WIDTH {}",
	"exiftool {}",
];

const MEDIA: &[&str] = &["mediainfo {}", "ffprobe -hide_banner {}", "exiftool {}"];

pub(super) const DEFAULT_RENDERERS: &[(&[&str], &[&str])] = &[
	(&["text/plain", "text/x-shellscript", "text/csv"], TEXT),
	(
		&["application/json"],
		&[
			"jq -C .",
			"bat --color=always --paging=never --style=plain -l json {}",
			"cat",
		],
	),
	(
		&["text/html"],
		&[
			"w3m -dump -T text/html -cols $TVIEW_WIDTH",
			"lynx -dump -stdin -width=$TVIEW_WIDTH",
			"elinks -dump -dump-width $TVIEW_WIDTH",
		],
	),
	(
		&["text/xml"],
		&[
			"bat --color=always --paging=never --style=plain -l xml {}",
			"xmllint --format -",
		],
	),
	(
		&[
			"image/png",
			"image/jpeg",
			"image/gif",
			"image/webp",
			"image/bmp",
			"image/tiff",
			"image/avif",
			"image/heif",
			"image/vnd.microsoft.icon",
		],
		IMAGE,
	),
	(
		&["image/svg+xml"],
		&["chafa --size=${TVIEW_WIDTH}x${TVIEW_HEIGHT} {}", "cat"],
	),
	(
		&[
			"video/mp4",
			"video/x-matroska",
			"video/webm",
			"video/quicktime",
			"video/x-msvideo",
			"video/x-flv",
			"audio/mpeg",
			"audio/x-flac",
			"audio/ogg",
			"audio/x-wav",
			"audio/m4a",
			"audio/aac",
		],
		MEDIA,
	),
	(
		&["application/pdf"],
		&[
			"pdftotext -l 10 -layout {} -",
			"mutool draw -F txt {} 1-10",
			"exiftool {}",
		],
	),
	(
		&[
			"application/vnd.openxmlformats-officedocument.wordprocessingml.document",
			"application/vnd.oasis.opendocument.text",
			"application/epub+zip",
		],
		&["pandoc -t plain --columns=$TVIEW_WIDTH {}"],
	),
	(
		&["application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"],
		&["xlsx2csv {}"],
	),
	(
		&["application/zip"],
		&["unzip -l {}", "bsdtar -tvf {}", "7z l {}"],
	),
	(&["application/x-tar"], &["tar -tvf {}", "bsdtar -tvf {}"]),
	(
		&["application/gzip", "application/x-bzip2", "application/x-xz"],
		&["tar -tvaf {}", "bsdtar -tvf {}"],
	),
	(&["application/x-7z-compressed"], &["7z l {}", "bsdtar -tvf {}"]),
	(&["application/vnd.rar"], &["unrar l {}", "7z l {}"]),
	(
		&["application/octet-stream"],
		&["file -b {}", "xxd", "hexdump -C"],
	),
];
